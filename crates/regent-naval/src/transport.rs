use regent_core::{AreaId, Assignment, Focus, TileId, UnitId, UnitTrait, WorldMut};
use regent_tasks::{ChildReport, HandlerKey, ParallelGroup, Step, Task, TaskContext};
use serde_json::json;
use tracing::debug;

use crate::{find_crossing, Embark, MoveUnit, ProduceUnit};

const TRANSPORT_BUILT: HandlerKey = HandlerKey("transport-built");
const TRANSPORT_RELEASED: HandlerKey = HandlerKey("transport-released");
const BUILD_GAVE_UP: HandlerKey = HandlerKey("build-gave-up");

/// Priority of the order commissioning a missing transport.
const PRODUCE_PRIORITY: f64 = 70.0;

/// Production requests tried before the crossing gives up on getting a transport.
const MAX_BUILD_ATTEMPTS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Acquire,
    PlanAndCross,
    Monitor,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Acquire => "acquire",
            Phase::PlanAndCross => "plan-and-cross",
            Phase::Monitor => "monitor",
        }
    }
}

/// Ferry a land unit across water to `to`.
///
/// Claims the free transport closest to the destination (or has one built), meets it at
/// the shore, boards, sails to the far coast, releases the transport and walks the rest
/// of the way.
#[derive(Debug, Clone)]
pub struct NavalTransport {
    cargo: UnitId,
    to: TileId,
    transport: Option<UnitId>,
    phase: Phase,
    home: Option<AreaId>,
    build_attempts: u32,
}

impl NavalTransport {
    pub fn new(cargo: UnitId, to: TileId) -> Self {
        Self {
            cargo,
            to,
            transport: None,
            phase: Phase::Acquire,
            home: None,
            build_attempts: 0,
        }
    }

    pub fn transport(&self) -> Option<UnitId> {
        self.transport
    }

    fn claim<W: WorldMut + 'static>(&mut self, unit: UnitId, cx: &mut TaskContext<'_, W>) {
        cx.registry.register(unit, cx.world.unit_traits(unit));
        cx.registry.assign(unit, Assignment::Transport);
        self.transport = Some(unit);
        debug!(cargo = %self.cargo, transport = %unit, "transport claimed");
    }

    /// Claim the free transport closest to the destination, or ask for one to be built.
    ///
    /// Returns whether a transport is now held.
    fn acquire<W>(&mut self, cx: &mut TaskContext<'_, W>) -> bool
    where
        W: WorldMut + 'static,
    {
        let world = &*cx.world;
        let nearest = cx
            .registry
            .free_with_trait(UnitTrait::Transport)
            .filter_map(|u| world.unit_tile(u).map(|t| (u, world.distance(t, self.to))))
            .min_by_key(|(_, d)| *d)
            .map(|(u, _)| u);
        if let Some(unit) = nearest {
            self.claim(unit, cx);
            self.phase = Phase::PlanAndCross;
            return true;
        }

        if self.build_attempts < MAX_BUILD_ATTEMPTS {
            self.build_attempts += 1;
            cx.spawn(
                ProduceUnit::new(UnitTrait::Transport, PRODUCE_PRIORITY)
                    .with_focus(Focus::Expansion)
                    .in_area(self.home),
            )
            .on_complete(TRANSPORT_BUILT)
            .on_fail(BUILD_GAVE_UP);
        }
        false
    }

    fn release<W: 'static>(&mut self, cx: &mut TaskContext<'_, W>) {
        if let Some(unit) = self.transport.take() {
            cx.registry.unassign(unit);
            debug!(cargo = %self.cargo, transport = %unit, "transport released");
        }
    }

    fn plan<W>(&mut self, cx: &mut TaskContext<'_, W>) -> Step
    where
        W: WorldMut + 'static,
    {
        let Some(transport) = self.transport else {
            return Step::fail("no transport available");
        };
        let Some(crossing) = find_crossing(&*cx.world, self.cargo, self.to) else {
            return Step::fail("no crossing found");
        };
        debug!(
            cargo = %self.cargo,
            %transport,
            land = %crossing.land_staging,
            sea = %crossing.sea_staging,
            arrival = %crossing.sea_arrival,
            "crossing planned"
        );

        cx.spawn(ParallelGroup::new(vec![
            Box::new(MoveUnit::new(self.cargo, crossing.land_staging)),
            Box::new(MoveUnit::new(transport, crossing.sea_staging)),
        ]));
        cx.spawn(Embark::new(self.cargo, transport));
        cx.spawn(MoveUnit::new(transport, crossing.sea_arrival))
            .on_complete(TRANSPORT_RELEASED);
        cx.spawn(MoveUnit::new(self.cargo, self.to));

        self.phase = Phase::Monitor;
        Step::Pending
    }
}

impl<W> Task<W> for NavalTransport
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> &'static str {
        "naval-transport"
    }

    fn init(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        let world = &*cx.world;
        let Some(from) = world.unit_tile(self.cargo) else {
            return Step::fail("unit is dead");
        };
        let home = world.area(from);
        if home.is_some() && home == world.area(self.to) {
            return Step::fail("no crossing needed");
        }
        self.home = home;

        if self.acquire(cx) {
            self.plan(cx)
        } else {
            Step::Pending
        }
    }

    fn step(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        match self.phase {
            Phase::Acquire | Phase::PlanAndCross => self.plan(cx),
            Phase::Monitor => match cx.world.unit_tile(self.cargo) {
                None => Step::fail("unit is dead"),
                Some(at) if at == self.to => Step::Complete,
                Some(_) => Step::Pending,
            },
        }
    }

    fn handle(&mut self, key: HandlerKey, report: &ChildReport, cx: &mut TaskContext<'_, W>) {
        match key {
            TRANSPORT_BUILT => {
                if let Some(unit) = report.produced {
                    self.claim(unit, cx);
                    self.phase = Phase::PlanAndCross;
                }
            }
            // A galley may have come free while the build was stuck.
            BUILD_GAVE_UP => {
                self.acquire(cx);
            }
            TRANSPORT_RELEASED => self.release(cx),
            _ => {}
        }
    }

    fn cleanup(&mut self, cx: &mut TaskContext<'_, W>) {
        self.release(cx);
    }

    fn progress_state(&self, world: &W) -> Option<String> {
        let cargo = world
            .unit_tile(self.cargo)
            .map_or_else(|| "none".to_string(), |t| t.to_string());
        let transport = self
            .transport
            .and_then(|u| world.unit_tile(u))
            .map_or_else(|| "none".to_string(), |t| t.to_string());
        Some(format!("{}-{}-{}", self.phase.as_str(), cargo, transport))
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "cargo": self.cargo,
            "to": self.to,
            "transport": self.transport,
            "phase": self.phase.as_str(),
        })
    }
}
