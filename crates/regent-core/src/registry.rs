//! Exclusive-ownership ledger for units.
//!
//! Invariant: a unit is in the free pool for trait `T` iff it has `T` and no assignment.
//! Every mutation below preserves it.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::{Assignment, PlayerId, UnitId, UnitTrait, WorldView};

#[derive(Debug, Default, Clone)]
pub struct AssignmentRegistry {
    traits: BTreeMap<UnitId, Vec<UnitTrait>>,
    assignments: BTreeMap<UnitId, Assignment>,
    free: BTreeMap<UnitTrait, BTreeSet<UnitId>>,
    by_assignment: BTreeMap<Assignment, BTreeSet<UnitId>>,
}

impl AssignmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Introduce (or re-describe) a unit. Keeps any existing assignment.
    pub fn register(&mut self, unit: UnitId, traits: Vec<UnitTrait>) {
        if let Some(old) = self.traits.remove(&unit) {
            self.remove_from_pools(unit, &old);
        }
        if !self.assignments.contains_key(&unit) {
            for t in &traits {
                self.free.entry(*t).or_default().insert(unit);
            }
        }
        self.traits.insert(unit, traits);
    }

    /// Rebuild the pools from the live unit list. Units missing from `units` are forgotten
    /// together with their assignment.
    pub fn sync(&mut self, units: impl IntoIterator<Item = (UnitId, Vec<UnitTrait>)>) {
        let live: BTreeMap<UnitId, Vec<UnitTrait>> = units.into_iter().collect();

        let gone: Vec<UnitId> = self
            .assignments
            .keys()
            .filter(|u| !live.contains_key(u))
            .copied()
            .collect();
        for unit in gone {
            if let Some(tag) = self.assignments.remove(&unit) {
                debug!(%unit, ?tag, "dropping assignment of vanished unit");
            }
        }

        self.traits = live;
        self.free.clear();
        self.by_assignment.clear();
        for (unit, traits) in &self.traits {
            match self.assignments.get(unit) {
                Some(tag) => {
                    self.by_assignment.entry(*tag).or_default().insert(*unit);
                }
                None => {
                    for t in traits {
                        self.free.entry(*t).or_default().insert(*unit);
                    }
                }
            }
        }
    }

    pub fn sync_with_world<W: WorldView + ?Sized>(&mut self, world: &W, player: PlayerId) {
        let units = world
            .units(player)
            .into_iter()
            .map(|u| (u, world.unit_traits(u)));
        self.sync(units);
    }

    /// Give `unit` to `tag`, superseding any previous owner.
    pub fn assign(&mut self, unit: UnitId, tag: Assignment) {
        self.unassign(unit);
        self.assignments.insert(unit, tag);
        self.by_assignment.entry(tag).or_default().insert(unit);
        if let Some(traits) = self.traits.get(&unit).cloned() {
            self.remove_from_pools(unit, &traits);
        }
    }

    /// Return `unit` to the free pools. Returns `false` if it had no assignment.
    pub fn unassign(&mut self, unit: UnitId) -> bool {
        let Some(tag) = self.assignments.remove(&unit) else {
            return false;
        };
        if let Some(set) = self.by_assignment.get_mut(&tag) {
            set.remove(&unit);
        }
        if let Some(traits) = self.traits.get(&unit) {
            for t in traits {
                self.free.entry(*t).or_default().insert(unit);
            }
        }
        true
    }

    pub fn assignment(&self, unit: UnitId) -> Option<Assignment> {
        self.assignments.get(&unit).copied()
    }

    pub fn is_free(&self, unit: UnitId) -> bool {
        self.traits.contains_key(&unit) && !self.assignments.contains_key(&unit)
    }

    pub fn free_with_trait(&self, t: UnitTrait) -> impl Iterator<Item = UnitId> + '_ {
        self.free.get(&t).into_iter().flatten().copied()
    }

    pub fn assigned_to(&self, tag: Assignment) -> impl Iterator<Item = UnitId> + '_ {
        self.by_assignment.get(&tag).into_iter().flatten().copied()
    }

    pub fn traits_of(&self, unit: UnitId) -> &[UnitTrait] {
        self.traits.get(&unit).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn units(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.traits.keys().copied()
    }

    pub fn assigned_count(&self) -> usize {
        self.assignments.len()
    }

    fn remove_from_pools(&mut self, unit: UnitId, traits: &[UnitTrait]) {
        for t in traits {
            if let Some(set) = self.free.get_mut(t) {
                set.remove(&unit);
            }
        }
    }
}
