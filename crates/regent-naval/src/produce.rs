use regent_core::{
    AreaId, CityId, DeterministicRng, Focus, Order, OrderGroup, UnitDef, UnitDefId, UnitId,
    UnitTrait, WorldMut, WorldView,
};
use regent_tasks::{Step, Task, TaskContext};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Clone)]
struct Request {
    city: CityId,
    /// Units of the requested type already standing in the city when the order went out.
    existing: Vec<UnitId>,
    started: bool,
}

/// Get a city to build the best unit having some trait, then hand the unit to the parent.
///
/// Each turn without an accepted order it proposes a `city-produce` order to one eligible
/// idle city; the order competes in arbitration like any other. With no eligible city for
/// six turns it fails as stuck.
#[derive(Debug, Clone)]
pub struct ProduceUnit {
    wanted: UnitTrait,
    focus: Option<Focus>,
    priority: f64,
    area: Option<AreaId>,
    def: Option<UnitDefId>,
    request: Option<Request>,
    produced: Option<UnitId>,
}

impl ProduceUnit {
    pub fn new(wanted: UnitTrait, priority: f64) -> Self {
        Self {
            wanted,
            focus: None,
            priority,
            area: None,
            def: None,
            request: None,
            produced: None,
        }
    }

    pub fn with_focus(mut self, focus: Focus) -> Self {
        self.focus = Some(focus);
        self
    }

    /// Only consider cities touching `area`.
    pub fn in_area(mut self, area: Option<AreaId>) -> Self {
        self.area = area;
        self
    }

    pub fn produced(&self) -> Option<UnitId> {
        self.produced
    }

    fn units_of<W: WorldView + ?Sized>(world: &W, city: CityId, def: UnitDefId) -> Vec<UnitId> {
        let Some(tile) = world.city_tile(city) else {
            return Vec::new();
        };
        world
            .units_at(tile)
            .into_iter()
            .filter(|u| world.unit_def(*u) == Some(def))
            .collect()
    }

    fn request<W>(&mut self, def: UnitDefId, cx: &mut TaskContext<'_, W>)
    where
        W: WorldMut + 'static,
    {
        let world = &*cx.world;
        let candidates: Vec<CityId> = world
            .idle_cities(cx.turn.player)
            .into_iter()
            .filter(|c| world.can_produce(*c, def))
            .filter(|c| self.area.is_none_or(|a| world.city_areas(*c).contains(&a)))
            .collect();
        if candidates.is_empty() {
            return;
        }

        let city = candidates[cx.rng().next_index(candidates.len())];
        let existing = Self::units_of(&*cx.world, city, def);
        let mut order = Order::new(
            OrderGroup::CityProduce,
            city.0,
            self.priority,
            move |w: &mut W| w.produce(city, def),
        );
        if let Some(focus) = self.focus {
            order = order.with_focus(focus);
        }
        cx.emit(order);
        self.request = Some(Request {
            city,
            existing,
            started: false,
        });
    }
}

/// Most expensive definition wins.
fn best_def(defs: Vec<UnitDef>, wanted: UnitTrait) -> Option<UnitDef> {
    defs.into_iter()
        .filter(|d| d.has_trait(wanted))
        .fold(None, |best: Option<UnitDef>, d| match best {
            Some(b) if b.production_cost >= d.production_cost => Some(b),
            _ => Some(d),
        })
}

impl<W> Task<W> for ProduceUnit
where
    W: WorldMut + 'static,
{
    fn kind(&self) -> &'static str {
        "produce-unit"
    }

    fn init(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        let Some(def) = best_def(cx.world.unit_defs(cx.turn.player), self.wanted) else {
            return Step::fail(format!("no unit type with trait {:?}", self.wanted));
        };
        debug!(wanted = ?self.wanted, def = %def.id, name = %def.name, "unit type chosen");
        self.def = Some(def.id);
        self.request(def.id, cx);
        Step::Pending
    }

    fn step(&mut self, cx: &mut TaskContext<'_, W>) -> Step {
        let Some(def) = self.def else {
            return Step::fail("no unit type chosen");
        };

        if let Some(req) = self.request.as_mut() {
            let world = &*cx.world;
            if world.current_production(req.city) == Some(def) {
                req.started = true;
                return Step::Pending;
            }
            let built = Self::units_of(world, req.city, def)
                .into_iter()
                .find(|u| !req.existing.contains(u));
            if let Some(unit) = built {
                self.produced = Some(unit);
                return Step::Complete;
            }
            if req.started {
                return Step::fail("production interrupted");
            }
            // The order lost its auction (or the city changed its mind); ask again.
            self.request = None;
        }

        self.request(def, cx);
        Step::Pending
    }

    fn produced_unit(&self) -> Option<UnitId> {
        self.produced
    }

    /// Constant while no city can take the order, so the task stalls out instead of
    /// waiting forever; silent while an order is out.
    fn progress_state(&self, _world: &W) -> Option<String> {
        self.request.is_none().then(|| "no-city".to_string())
    }

    fn snapshot(&self) -> serde_json::Value {
        json!({
            "trait": self.wanted,
            "def": self.def,
            "city": self.request.as_ref().map(|r| r.city),
            "started": self.request.as_ref().is_some_and(|r| r.started),
            "produced": self.produced,
        })
    }
}
