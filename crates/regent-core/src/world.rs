//! Collaborator interfaces.
//!
//! The AI never owns game state. Map queries, pathfinding, movement and production are
//! reached through these traits so the scheduler can run against the real game, a test
//! fixture, or the reference grid in `regent-grid`.

use crate::{AreaId, CityId, Domain, PlayerId, TileId, UnitDefId, UnitId, UnitTrait};

/// Who is asking for a route, and under which movement rules.
///
/// `domain` is normally the unit's own domain; overriding it lets callers query routes the
/// unit could not take on its own (e.g. a land unit "pretending" to cross water).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mover {
    pub unit: UnitId,
    pub domain: Domain,
}

impl Mover {
    pub fn native<W: WorldView + ?Sized>(world: &W, unit: UnitId) -> Self {
        Self {
            unit,
            domain: world.unit_domain(unit),
        }
    }

    pub fn with_domain(self, domain: Domain) -> Self {
        Self { domain, ..self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitDef {
    pub id: UnitDefId,
    pub name: String,
    pub traits: Vec<UnitTrait>,
    pub domain: Domain,
    pub production_cost: u32,
}

impl UnitDef {
    pub fn has_trait(&self, t: UnitTrait) -> bool {
        self.traits.contains(&t)
    }
}

/// Result of one turn of movement along a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The unit advanced this many tiles along the route.
    Moved(usize),
    /// No movement points left (or the unit is carried and cannot act); try next turn.
    Stalled,
    /// The next route tile cannot be entered; the caller should re-plan.
    Blocked,
}

/// Read-only world access.
pub trait WorldView {
    fn neighbours(&self, tile: TileId) -> Vec<TileId>;
    fn distance(&self, a: TileId, b: TileId) -> u32;
    fn is_water(&self, tile: TileId) -> bool;
    fn city_at(&self, tile: TileId) -> Option<CityId>;
    /// Connectivity region of `tile` within its own domain (land tiles map to land regions,
    /// water tiles to water regions).
    fn area(&self, tile: TileId) -> Option<AreaId>;

    fn units(&self, player: PlayerId) -> Vec<UnitId>;
    /// `None` once the unit is dead.
    fn unit_tile(&self, unit: UnitId) -> Option<TileId>;
    fn unit_traits(&self, unit: UnitId) -> Vec<UnitTrait>;
    fn unit_def(&self, unit: UnitId) -> Option<UnitDefId>;
    fn unit_domain(&self, unit: UnitId) -> Domain;
    fn movement_left(&self, unit: UnitId) -> u32;
    fn carried_units(&self, transport: UnitId) -> Vec<UnitId>;
    fn units_at(&self, tile: TileId) -> Vec<UnitId>;

    /// Route from the mover's tile to `to`, excluding the start tile and including `to`.
    fn find_path(&self, mover: Mover, to: TileId) -> Option<Vec<TileId>>;

    fn unit_defs(&self, player: PlayerId) -> Vec<UnitDef>;
    fn cities(&self, player: PlayerId) -> Vec<CityId>;
    fn city_tile(&self, city: CityId) -> Option<TileId>;
    /// Regions the city touches: its own land region plus adjacent water regions.
    fn city_areas(&self, city: CityId) -> Vec<AreaId>;
    fn can_produce(&self, city: CityId, def: UnitDefId) -> bool;
    fn current_production(&self, city: CityId) -> Option<UnitDefId>;

    fn is_alive(&self, unit: UnitId) -> bool {
        self.unit_tile(unit).is_some()
    }

    /// Cities of `player` with an empty build slot.
    fn idle_cities(&self, player: PlayerId) -> Vec<CityId> {
        self.cities(player)
            .into_iter()
            .filter(|c| self.current_production(*c).is_none())
            .collect()
    }
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {
    /// Spend this turn's movement points following `route` (as returned by
    /// [`WorldView::find_path`]). Owns embarkation: entering a tile that hosts a friendly
    /// transport attaches the unit as cargo, leaving a transport onto land detaches it.
    fn advance(&mut self, unit: UnitId, route: &[TileId]) -> MoveOutcome;

    /// Single step onto an adjacent tile. Returns `false` if the move was refused.
    fn step_onto(&mut self, unit: UnitId, tile: TileId) -> bool;

    fn produce(&mut self, city: CityId, def: UnitDefId);
}
