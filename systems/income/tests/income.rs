use std::time::Duration;

use garden_defence_core::{Command, Event, GamePhase};
use garden_defence_system_income::{Config, Income};
use garden_defence_world::{self as world, query, World};

fn reference_income() -> Income {
    Income::new(Config::new(Duration::from_millis(5_000), 25))
}

fn tick(world: &mut World, income: &mut Income, dt: Duration) {
    let mut events = Vec::new();
    world::apply(world, Command::Tick { dt }, &mut events);
    let mut commands = Vec::new();
    income.handle(&events, query::phase(world), &mut commands);
    for command in commands {
        let mut credited = Vec::new();
        world::apply(world, command, &mut credited);
    }
}

#[test]
fn balance_grows_by_fixed_amount_per_interval() {
    let mut world = World::new();
    let mut income = reference_income();
    assert_eq!(query::balance(&world), 50);

    tick(&mut world, &mut income, Duration::from_millis(5_000));
    assert_eq!(query::balance(&world), 75);

    tick(&mut world, &mut income, Duration::from_millis(5_000));
    assert_eq!(query::balance(&world), 100);
}

#[test]
fn small_ticks_accumulate_until_the_interval_elapses() {
    let mut world = World::new();
    let mut income = reference_income();

    for _ in 0..49 {
        tick(&mut world, &mut income, Duration::from_millis(100));
    }
    assert_eq!(query::balance(&world), 50, "no credit before 5000 ms");

    tick(&mut world, &mut income, Duration::from_millis(100));
    assert_eq!(query::balance(&world), 75);
}

#[test]
fn large_tick_credits_every_elapsed_interval() {
    let mut income = reference_income();
    let mut commands = Vec::new();

    income.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(15_000),
        }],
        GamePhase::Running,
        &mut commands,
    );

    assert_eq!(commands, vec![Command::CreditCompost { amount: 25 }; 3]);
}

#[test]
fn game_over_makes_income_inert() {
    let mut income = reference_income();
    let mut commands = Vec::new();

    income.handle(
        &[
            Event::TimeAdvanced {
                dt: Duration::from_millis(5_000),
            },
            Event::GameOver,
        ],
        GamePhase::Running,
        &mut commands,
    );
    income.handle(
        &[Event::TimeAdvanced {
            dt: Duration::from_millis(50_000),
        }],
        GamePhase::Over,
        &mut commands,
    );

    assert!(commands.is_empty());
}
