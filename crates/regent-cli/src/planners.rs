use regent_core::{
    Assignment, CityId, Focus, Order, OrderGroup, UnitDef, UnitDefId, UnitTrait, WorldMut,
    WorldView,
};
use regent_grid::GridWorld;
use regent_naval::NavalTransport;
use regent_turn::{PlanContext, Planner, Proposal};
use tracing::debug;

use crate::scenario::Target;

/// Priority of a defender order; below a commissioned transport.
const GARRISON_PRIORITY: f64 = 40.0;

/// Roots one water crossing per scenario expedition, on the first turn it runs.
pub struct ExpeditionPlanner {
    pending: Vec<Target>,
}

impl ExpeditionPlanner {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { pending: targets }
    }
}

impl Planner<GridWorld> for ExpeditionPlanner {
    fn name(&self) -> &'static str {
        "expedition"
    }

    fn plan(&mut self, _cx: &mut PlanContext<'_, GridWorld>) -> Vec<Proposal<GridWorld>> {
        self.pending
            .drain(..)
            .map(|t| Proposal::task(NavalTransport::new(t.unit, t.to)))
            .collect()
    }
}

/// Keeps a military unit in every city.
///
/// Units already standing in a city are tagged as its garrison; an idle city with no
/// defender proposes building the cheapest military unit it can.
#[derive(Default)]
pub struct GarrisonPlanner;

impl GarrisonPlanner {
    fn defender_def(defs: &[UnitDef]) -> Option<&UnitDef> {
        defs.iter()
            .filter(|d| d.has_trait(UnitTrait::Military))
            .min_by_key(|d| d.production_cost)
    }
}

impl Planner<GridWorld> for GarrisonPlanner {
    fn name(&self) -> &'static str {
        "garrison"
    }

    fn plan(&mut self, cx: &mut PlanContext<'_, GridWorld>) -> Vec<Proposal<GridWorld>> {
        let world = cx.world;
        let player = cx.turn.player;
        let defs = world.unit_defs(player);
        let Some(def) = Self::defender_def(&defs) else {
            return Vec::new();
        };

        let mut proposals = Vec::new();
        for city in world.cities(player) {
            let Some(tile) = world.city_tile(city) else {
                continue;
            };
            let defenders: Vec<_> = world
                .units_at(tile)
                .into_iter()
                .filter(|u| world.unit_owner(*u) == Some(player))
                .filter(|u| world.unit_traits(*u).contains(&UnitTrait::Military))
                .collect();

            for unit in &defenders {
                if cx.registry.is_free(*unit) {
                    cx.registry.assign(*unit, Assignment::Garrison);
                    debug!(%city, %unit, "garrison assigned");
                }
            }
            if !defenders.is_empty() || world.current_production(city).is_some() {
                continue;
            }
            if !world.can_produce(city, def.id) {
                continue;
            }
            proposals.push(Proposal::Order(defender_order(city, def.id)));
        }
        proposals
    }
}

fn defender_order(city: CityId, def: UnitDefId) -> Order<GridWorld> {
    Order::new(
        OrderGroup::CityProduce,
        city.0,
        GARRISON_PRIORITY,
        move |w: &mut GridWorld| w.produce(city, def),
    )
    .with_focus(Focus::Military)
}
