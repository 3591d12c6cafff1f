//! Per-tick combat pass: advance, contact, burst overlap and breach detection.

use std::time::Duration;

use garden_defence_core::{DefenderId, Event, GridCell, PestId};
use log::{debug, info};

use crate::{registry::Pest, World};

/// Runs the four combat stages in their fixed order.
pub(crate) fn resolve(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    advance(world, dt, out_events);
    engage(world, out_events);
    detonate(world, out_events);
    check_breach(world, out_events);
}

#[derive(Clone, Copy, Debug)]
struct Obstacle {
    defender: DefenderId,
    cell: GridCell,
    x: f32,
}

fn advance(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    for pest in world.registry.release_orphaned_pests() {
        debug!("pest {} released", pest.get());
    }

    let seconds = dt.as_secs_f32();
    for pest in world.registry.pests_mut() {
        pest.previous_position = pest.position;
        if pest.engaged_with.is_some() || seconds <= 0.0 {
            continue;
        }
        pest.position -= pest.speed * seconds;
        out_events.push(Event::PestMoved {
            pest: pest.id,
            position: pest.position,
        });
    }
}

/// Ordinary defenders stop pests on contact. Neither side takes damage: the
/// marigold attack and pest bite mechanics are not modelled.
fn engage(world: &mut World, out_events: &mut Vec<Event>) {
    let range = world.config.contact_range;
    let blockers = obstacles(world, false);
    if blockers.is_empty() {
        return;
    }

    for pest in world.registry.pests_mut() {
        if pest.engaged_with.is_some() {
            continue;
        }
        let Some(blocker) = first_reached(&blockers, pest, range).map(|index| blockers[index]) else {
            continue;
        };

        pest.engaged_with = Some(blocker.defender);
        // A long step may carry the pest past the defender; hold it on the near side.
        pest.position = (blocker.x + range)
            .min(pest.previous_position)
            .max(pest.position);
        debug!(
            "pest {} engaged by defender {}",
            pest.id.get(),
            blocker.defender.get()
        );
        out_events.push(Event::PestEngaged {
            pest: pest.id,
            defender: blocker.defender,
        });
    }
}

/// Each area-burst defender fires at most once and is always consumed.
fn detonate(world: &mut World, out_events: &mut Vec<Event>) {
    let range = world.config.contact_range;
    let damage = world.config.burst_damage;
    let mut armed = obstacles(world, true);
    if armed.is_empty() {
        return;
    }

    let mut spent: Vec<DefenderId> = Vec::new();
    let mut destroyed: Vec<PestId> = Vec::new();
    for pest in world.registry.pests_mut() {
        let Some(index) = first_reached(&armed, pest, range) else {
            continue;
        };

        let burst = armed.remove(index);
        spent.push(burst.defender);
        pest.health = pest.health.saturating_sub(damage);
        debug!(
            "defender {} burst on pest {}, health now {}",
            burst.defender.get(),
            pest.id.get(),
            pest.health
        );
        if pest.health <= 0 {
            destroyed.push(pest.id);
        } else {
            out_events.push(Event::PestDamaged {
                pest: pest.id,
                health: pest.health,
            });
        }
    }

    for pest in destroyed {
        if world.registry.remove_pest(pest).is_some() {
            out_events.push(Event::PestRemoved { pest });
        }
    }
    for defender in spent {
        if let Some(cell) = world.remove_defender_entry(defender) {
            out_events.push(Event::DefenderRemoved { defender, cell });
        }
    }
}

fn check_breach(world: &mut World, out_events: &mut Vec<Event>) {
    let breach_x = world.config.layout.breach_x;
    let Some(pest) = world
        .registry
        .pests()
        .find(|pest| pest.position < breach_x)
        .map(|pest| (pest.id, pest.lane))
    else {
        return;
    };

    if world.end_game() {
        info!("pest {} breached lane {}; game over", pest.0.get(), pest.1);
        out_events.push(Event::GameOver);
    }
}

fn obstacles(world: &World, area_burst: bool) -> Vec<Obstacle> {
    world
        .registry
        .defenders()
        .filter(|defender| defender.kind.is_area_burst() == area_burst)
        .map(|defender| Obstacle {
            defender: defender.id,
            cell: defender.cell,
            x: world.config.layout.column_x(defender.cell.column()),
        })
        .collect()
}

/// Index of the obstacle in the pest's lane that its leftward sweep touched
/// first, i.e. the overlapping one furthest to the right.
fn first_reached(obstacles: &[Obstacle], pest: &Pest, range: f32) -> Option<usize> {
    obstacles
        .iter()
        .enumerate()
        .filter(|(_, obstacle)| {
            obstacle.cell.row() == pest.lane
                && swept_overlap(pest.previous_position, pest.position, obstacle.x, range)
        })
        .max_by(|(_, left), (_, right)| left.x.total_cmp(&right.x))
        .map(|(index, _)| index)
}

/// Reports whether the span a pest covered this tick touches the band of
/// width `2 * range` centred on `x`.
fn swept_overlap(from: f32, to: f32, x: f32, range: f32) -> bool {
    let (low, high) = if from <= to { (from, to) } else { (to, from) };
    low <= x + range && high >= x - range
}
