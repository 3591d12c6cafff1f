//! Authoritative defender and pest collections plus identifier allocation.

use std::collections::BTreeMap;

use garden_defence_core::{
    DefenderId, DefenderKind, DefenderSnapshot, GridCell, PestId, PestSnapshot,
};

/// Defender stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Defender {
    /// Identifier allocated by the world for the defender.
    pub(crate) id: DefenderId,
    /// Kind of defender that was planted.
    pub(crate) kind: DefenderKind,
    /// Cell occupied by the defender.
    pub(crate) cell: GridCell,
    /// Remaining health; `None` for area-burst kinds.
    pub(crate) health: Option<u32>,
}

impl Defender {
    pub(crate) fn snapshot(&self) -> DefenderSnapshot {
        DefenderSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            health: self.health,
        }
    }
}

/// Pest stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Pest {
    pub(crate) id: PestId,
    pub(crate) lane: u32,
    pub(crate) position: f32,
    /// Position at the start of the latest advance, used for swept contact.
    pub(crate) previous_position: f32,
    pub(crate) health: i32,
    pub(crate) speed: f32,
    pub(crate) engaged_with: Option<DefenderId>,
}

impl Pest {
    pub(crate) fn snapshot(&self) -> PestSnapshot {
        PestSnapshot {
            id: self.id,
            lane: self.lane,
            position: self.position,
            health: self.health,
            speed: self.speed,
            engaged_with: self.engaged_with,
        }
    }
}

/// Registry that stores entities keyed by identity.
///
/// `BTreeMap` keeps iteration ordered by identifier, which is what makes a
/// combat pass deterministic.
#[derive(Debug)]
pub(crate) struct EntityRegistry {
    defenders: BTreeMap<DefenderId, Defender>,
    pests: BTreeMap<PestId, Pest>,
    next_defender_id: DefenderId,
    next_pest_id: PestId,
}

impl EntityRegistry {
    /// Creates an empty registry with reset identifier counters.
    pub(crate) fn new() -> Self {
        Self {
            defenders: BTreeMap::new(),
            pests: BTreeMap::new(),
            next_defender_id: DefenderId::new(0),
            next_pest_id: PestId::new(0),
        }
    }

    pub(crate) fn add_defender(
        &mut self,
        kind: DefenderKind,
        cell: GridCell,
        health: Option<u32>,
    ) -> DefenderId {
        let id = self.next_defender_id;
        self.next_defender_id = DefenderId::new(id.get().wrapping_add(1));
        let _ = self.defenders.insert(
            id,
            Defender {
                id,
                kind,
                cell,
                health,
            },
        );
        id
    }

    /// Registers a pest standing at `position` in `lane`.
    pub(crate) fn add_pest(&mut self, lane: u32, position: f32, health: i32, speed: f32) -> PestId {
        let id = self.next_pest_id;
        self.next_pest_id = PestId::new(id.get().wrapping_add(1));
        let _ = self.pests.insert(
            id,
            Pest {
                id,
                lane,
                position,
                previous_position: position,
                health,
                speed,
                engaged_with: None,
            },
        );
        id
    }

    pub(crate) fn remove_defender(&mut self, id: DefenderId) -> Option<Defender> {
        self.defenders.remove(&id)
    }

    pub(crate) fn remove_pest(&mut self, id: PestId) -> Option<Pest> {
        self.pests.remove(&id)
    }

    pub(crate) fn defender(&self, id: DefenderId) -> Option<&Defender> {
        self.defenders.get(&id)
    }

    pub(crate) fn defenders(&self) -> impl Iterator<Item = &Defender> {
        self.defenders.values()
    }

    pub(crate) fn pests(&self) -> impl Iterator<Item = &Pest> {
        self.pests.values()
    }

    pub(crate) fn pests_mut(&mut self) -> impl Iterator<Item = &mut Pest> {
        self.pests.values_mut()
    }

    /// Frees every pest whose blocking defender no longer exists.
    pub(crate) fn release_orphaned_pests(&mut self) -> Vec<PestId> {
        let defenders = &self.defenders;
        let mut released = Vec::new();
        for pest in self.pests.values_mut() {
            if let Some(blocker) = pest.engaged_with {
                if !defenders.contains_key(&blocker) {
                    pest.engaged_with = None;
                    released.push(pest.id);
                }
            }
        }
        released
    }
}
