use garden_defence_core::{
    Command, DefenderKind, Event, GamePhase, GardenConfig, GridCell, KindCosts, PlacementError,
};
use garden_defence_world::{self as world, query, World};

fn rich_world() -> World {
    World::with_config(GardenConfig {
        starting_compost: 1_000,
        ..GardenConfig::default()
    })
}

fn place(world: &mut World, kind: DefenderKind, row: i64, column: i64) -> Vec<Event> {
    let mut events = Vec::new();
    world::apply(world, Command::PlaceDefender { kind, row, column }, &mut events);
    events
}

fn rejection(events: &[Event]) -> Option<PlacementError> {
    events.iter().find_map(|event| match event {
        Event::PlacementRejected { reason, .. } => Some(*reason),
        _ => None,
    })
}

#[test]
fn successful_placement_deducts_cost_and_occupies_cell() {
    let mut world = World::new();

    let events = place(&mut world, DefenderKind::Marigold, 2, 4);

    assert_eq!(query::balance(&world), 0, "cost must be deducted exactly once");
    let defenders = query::defender_view(&world).into_vec();
    assert_eq!(defenders.len(), 1, "exactly one defender is created");
    let defender = defenders[0];
    assert_eq!(defender.kind, DefenderKind::Marigold);
    assert_eq!(defender.cell, GridCell::new(2, 4));
    assert_eq!(defender.health, Some(100));
    assert_eq!(
        query::occupant(&world, GridCell::new(2, 4)),
        Some(defender.id)
    );
    assert_eq!(
        events,
        vec![
            Event::EconomyChanged { balance: 0 },
            Event::DefenderPlaced {
                defender: defender.id,
                kind: DefenderKind::Marigold,
                cell: GridCell::new(2, 4),
            },
        ],
    );
}

#[test]
fn area_burst_defenders_carry_no_health() {
    let mut world = World::new();
    let _ = place(&mut world, DefenderKind::Garlic, 0, 0);

    let defenders = query::defender_view(&world).into_vec();
    assert_eq!(defenders[0].health, None);
}

#[test]
fn occupied_cell_rejection_never_touches_balance() {
    let mut world = rich_world();
    let _ = place(&mut world, DefenderKind::Marigold, 1, 1);
    let balance = query::balance(&world);

    for kind in DefenderKind::ALL {
        let events = place(&mut world, kind, 1, 1);
        assert_eq!(rejection(&events), Some(PlacementError::CellOccupied));
        assert_eq!(events.len(), 1, "rejection is the only event");
    }

    assert_eq!(query::balance(&world), balance);
    assert_eq!(query::defender_view(&world).len(), 1);
}

#[test]
fn insufficient_funds_are_rejected_without_side_effects() {
    let mut world = World::new();
    let _ = place(&mut world, DefenderKind::Garlic, 0, 0);

    let events = place(&mut world, DefenderKind::Marigold, 0, 1);

    assert_eq!(rejection(&events), Some(PlacementError::InsufficientFunds));
    assert_eq!(query::balance(&world), 0);
    assert_eq!(query::occupant(&world, GridCell::new(0, 1)), None);
    assert_eq!(query::defender_view(&world).len(), 1);
}

#[test]
fn out_of_bounds_is_reported_regardless_of_balance() {
    for starting_compost in [0, 50, 10_000] {
        let mut world = World::with_config(GardenConfig {
            starting_compost,
            ..GardenConfig::default()
        });
        let (rows, columns) = query::grid_dimensions(&world);

        for (row, column) in [
            (-1, 0),
            (0, -1),
            (0, i64::from(columns)),
            (i64::from(rows), 0),
        ] {
            let events = place(&mut world, DefenderKind::Marigold, row, column);
            assert_eq!(
                rejection(&events),
                Some(PlacementError::OutOfBounds),
                "({row}, {column}) with balance {starting_compost}",
            );
        }
        assert_eq!(query::balance(&world), starting_compost);
        assert!(query::defender_view(&world).is_empty());
    }
}

#[test]
fn kind_without_configured_cost_is_unknown() {
    let mut world = World::with_config(GardenConfig {
        costs: KindCosts {
            garlic: None,
            ..KindCosts::default()
        },
        ..GardenConfig::default()
    });

    let events = place(&mut world, DefenderKind::Garlic, 0, 0);

    assert_eq!(rejection(&events), Some(PlacementError::UnknownKind));
    assert_eq!(query::balance(&world), 50);
}

#[test]
fn unknown_kind_outranks_bounds_and_funds() {
    let mut world = World::with_config(GardenConfig {
        starting_compost: 0,
        costs: KindCosts {
            marigold: None,
            ..KindCosts::default()
        },
        ..GardenConfig::default()
    });

    let events = place(&mut world, DefenderKind::Marigold, -1, -1);

    assert_eq!(rejection(&events), Some(PlacementError::UnknownKind));
}

#[test]
fn insufficient_funds_outranks_occupancy() {
    let mut world = World::new();
    let _ = place(&mut world, DefenderKind::Marigold, 3, 3);

    let events = place(&mut world, DefenderKind::Marigold, 3, 3);

    assert_eq!(rejection(&events), Some(PlacementError::InsufficientFunds));
}

#[test]
fn income_accumulates_from_starting_balance() {
    let mut world = World::new();
    let mut events = Vec::new();

    world::apply(&mut world, Command::CreditCompost { amount: 25 }, &mut events);
    assert_eq!(query::balance(&world), 75);
    world::apply(&mut world, Command::CreditCompost { amount: 25 }, &mut events);
    assert_eq!(query::balance(&world), 100);

    assert_eq!(
        events,
        vec![
            Event::EconomyChanged { balance: 75 },
            Event::EconomyChanged { balance: 100 },
        ],
    );
}

#[test]
fn game_over_rejects_every_placement() {
    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(&mut world, Command::SpawnPest { lane: 0 }, &mut events);
    world::apply(
        &mut world,
        Command::ResolveCombat {
            dt: std::time::Duration::from_secs(60),
        },
        &mut events,
    );
    assert_eq!(query::phase(&world), GamePhase::Over);

    for (row, column) in [(0, 0), (-1, 0), (4, 8)] {
        let events = place(&mut world, DefenderKind::Garlic, row, column);
        assert_eq!(rejection(&events), Some(PlacementError::GameOver));
    }
    assert!(query::defender_view(&world).is_empty());
    assert_eq!(query::balance(&world), 50);
}
