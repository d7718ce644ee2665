use regent_core::{MoveOutcome, Mover, TileId, UnitId, WorldMut, WorldView};
use regent_tasks::{Step, Task, TaskContext};
use serde_json::json;
use tracing::trace;

/// Walk (or sail) a unit to a tile over as many turns as it takes.
#[derive(Debug, Clone)]
pub struct MoveUnit {
    unit: UnitId,
    to: TileId,
    route: Vec<TileId>,
}

impl MoveUnit {
    pub fn new(unit: UnitId, to: TileId) -> Self {
        Self {
            unit,
            to,
            route: Vec::new(),
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn target(&self) -> TileId {
        self.to
    }

    fn replan<V: WorldView + ?Sized>(&mut self, world: &V) -> bool {
        match world.find_path(Mover::native(world, self.unit), self.to) {
            Some(route) => {
                self.route = route;
                true
            }
            None => {
                self.route.clear();
                false
            }
        }
    }
}

impl<W> Task<W> for MoveUnit
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> &'static str {
        "move-unit"
    }

    fn step(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        let world = &mut *cx.world;
        let Some(at) = world.unit_tile(self.unit) else {
            return Step::fail("unit is dead");
        };
        if at == self.to {
            return Step::Complete;
        }

        // The cached route is only good while its head is next to us.
        let fresh = self
            .route
            .first()
            .is_some_and(|next| world.neighbours(at).contains(next));
        if !fresh && !self.replan(&*world) {
            return Step::fail("no path found");
        }

        let mut outcome = world.advance(self.unit, &self.route);
        if outcome == MoveOutcome::Blocked {
            if !self.replan(&*world) {
                return Step::fail("no path found");
            }
            outcome = world.advance(self.unit, &self.route);
        }
        trace!(unit = %self.unit, to = %self.to, ?outcome, "move");

        match outcome {
            MoveOutcome::Moved(n) => {
                self.route.drain(..n.min(self.route.len()));
            }
            // Try again next turn with a fresh route.
            MoveOutcome::Blocked => self.route.clear(),
            MoveOutcome::Stalled => {}
        }

        if world.unit_tile(self.unit) == Some(self.to) {
            Step::Complete
        } else {
            Step::Pending
        }
    }

    fn progress_state(&self, world: &W) -> Option<String> {
        let tile = world.unit_tile(self.unit)?;
        let path = if self.route.is_empty() { "nopath" } else { "path" };
        Some(format!(
            "{}-{}-{}",
            tile,
            world.movement_left(self.unit),
            path
        ))
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "unit": self.unit,
            "to": self.to,
            "route": self.route.len(),
        })
    }
}
