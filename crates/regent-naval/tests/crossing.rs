//! Crossing discovery against a hand-built world where a city sits on navigable water.

use std::collections::HashMap;

use regent_core::{
    AreaId, CityId, Domain, Mover, PlayerId, TileId, UnitDef, UnitDefId, UnitId, UnitTrait,
    WorldView,
};
use regent_naval::{find_crossing, Crossing};

const CARGO: UnitId = UnitId(1);
const START: TileId = TileId(0);
const CANAL: TileId = TileId(1);
const STRAIT: TileId = TileId(2);
const SHORE: TileId = TileId(3);
const OPEN_SEA: TileId = TileId(4);

/// `START - CANAL - STRAIT - SHORE`, with `OPEN_SEA` touching the canal from the side.
/// The canal tile is water but hosts a city; the amphibious route is fixed.
struct Strip {
    water: Vec<bool>,
    cities: HashMap<TileId, CityId>,
    links: HashMap<TileId, Vec<TileId>>,
}

impl Strip {
    fn new() -> Self {
        let links = HashMap::from([
            (START, vec![CANAL]),
            (CANAL, vec![START, OPEN_SEA, STRAIT]),
            (STRAIT, vec![CANAL, SHORE]),
            (SHORE, vec![STRAIT]),
            (OPEN_SEA, vec![CANAL]),
        ]);
        Self {
            water: vec![false, true, true, false, true],
            cities: HashMap::from([(CANAL, CityId(1))]),
            links,
        }
    }

    fn with_city(mut self, tile: TileId, city: CityId) -> Self {
        self.cities.insert(tile, city);
        self
    }
}

impl WorldView for Strip {
    fn neighbours(&self, tile: TileId) -> Vec<TileId> {
        self.links.get(&tile).cloned().unwrap_or_default()
    }

    fn distance(&self, a: TileId, b: TileId) -> u32 {
        a.0.abs_diff(b.0)
    }

    fn is_water(&self, tile: TileId) -> bool {
        self.water.get(tile.0 as usize).copied().unwrap_or(false)
    }

    fn city_at(&self, tile: TileId) -> Option<CityId> {
        self.cities.get(&tile).copied()
    }

    fn area(&self, tile: TileId) -> Option<AreaId> {
        Some(AreaId(u32::from(self.is_water(tile))))
    }

    fn units(&self, _player: PlayerId) -> Vec<UnitId> {
        vec![CARGO]
    }

    fn unit_tile(&self, unit: UnitId) -> Option<TileId> {
        (unit == CARGO).then_some(START)
    }

    fn unit_traits(&self, _unit: UnitId) -> Vec<UnitTrait> {
        vec![UnitTrait::Military]
    }

    fn unit_def(&self, _unit: UnitId) -> Option<UnitDefId> {
        None
    }

    fn unit_domain(&self, _unit: UnitId) -> Domain {
        Domain::Land
    }

    fn movement_left(&self, _unit: UnitId) -> u32 {
        1
    }

    fn carried_units(&self, _transport: UnitId) -> Vec<UnitId> {
        Vec::new()
    }

    fn units_at(&self, tile: TileId) -> Vec<UnitId> {
        if tile == START {
            vec![CARGO]
        } else {
            Vec::new()
        }
    }

    fn find_path(&self, mover: Mover, to: TileId) -> Option<Vec<TileId>> {
        (mover.domain == Domain::Amphibious && to == SHORE).then(|| vec![CANAL, STRAIT, SHORE])
    }

    fn unit_defs(&self, _player: PlayerId) -> Vec<UnitDef> {
        Vec::new()
    }

    fn cities(&self, _player: PlayerId) -> Vec<CityId> {
        self.cities.values().copied().collect()
    }

    fn city_tile(&self, city: CityId) -> Option<TileId> {
        self.cities
            .iter()
            .find_map(|(tile, c)| (*c == city).then_some(*tile))
    }

    fn city_areas(&self, _city: CityId) -> Vec<AreaId> {
        Vec::new()
    }

    fn can_produce(&self, _city: CityId, _def: UnitDefId) -> bool {
        false
    }

    fn current_production(&self, _city: CityId) -> Option<UnitDefId> {
        None
    }
}

#[test]
fn sea_staging_on_a_city_moves_to_open_water_beside_it() {
    let world = Strip::new();
    let crossing = find_crossing(&world, CARGO, SHORE).unwrap();
    assert_eq!(
        crossing,
        Crossing {
            land_staging: START,
            sea_staging: OPEN_SEA,
            sea_arrival: STRAIT,
        }
    );
}

#[test]
fn city_neighbours_are_skipped_when_picking_open_water() {
    let world = Strip::new().with_city(OPEN_SEA, CityId(2));
    let crossing = find_crossing(&world, CARGO, SHORE).unwrap();
    assert_eq!(crossing.sea_staging, STRAIT);
}

#[test]
fn no_crossing_when_the_city_has_no_open_water_beside_it() {
    let world = Strip::new()
        .with_city(OPEN_SEA, CityId(2))
        .with_city(STRAIT, CityId(3));
    assert_eq!(find_crossing(&world, CARGO, SHORE), None);
}
