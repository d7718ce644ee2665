use regent_core::{UnitId, WorldMut};
use regent_tasks::{Step, Task, TaskContext};
use serde_json::json;

/// Step a land unit onto an adjacent transport.
///
/// The move itself may be refused or deferred by the world, so boarding is only trusted
/// once the transport lists the unit as cargo.
#[derive(Debug, Clone)]
pub struct Embark {
    cargo: UnitId,
    transport: UnitId,
}

impl Embark {
    pub fn new(cargo: UnitId, transport: UnitId) -> Self {
        Self { cargo, transport }
    }
}

impl<W> Task<W> for Embark
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> &'static str {
        "embark"
    }

    fn step(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        let world = &mut *cx.world;
        let Some(at) = world.unit_tile(self.cargo) else {
            return Step::fail("unit is dead");
        };
        let Some(ship) = world.unit_tile(self.transport) else {
            return Step::fail("transport is dead");
        };
        if world.carried_units(self.transport).contains(&self.cargo) {
            return Step::Complete;
        }
        if world.movement_left(self.cargo) == 0 {
            return Step::Pending;
        }
        if !world.neighbours(at).contains(&ship) {
            return Step::fail("transport out of reach");
        }

        world.step_onto(self.cargo, ship);
        if world.carried_units(self.transport).contains(&self.cargo) {
            Step::Complete
        } else {
            Step::Pending
        }
    }

    fn progress_state(&self, world: &W) -> Option<String> {
        let tile = world.unit_tile(self.cargo)?;
        Some(format!("{}-{}", tile, world.movement_left(self.cargo)))
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({ "cargo": self.cargo, "transport": self.transport })
    }
}
