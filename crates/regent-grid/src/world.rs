use std::collections::BTreeMap;

use regent_core::{
    AreaId, CityId, Domain, MoveOutcome, Mover, PlayerId, TileId, UnitDef, UnitDefId, UnitId,
    UnitTrait, WorldMut, WorldView,
};
use tracing::debug;

use crate::{path, Catalogue, GridMap, MapError, Terrain};

/// Owner of upper-case ASCII symbols.
pub const HOME: PlayerId = PlayerId(1);
/// Owner of lower-case ASCII symbols.
pub const RIVAL: PlayerId = PlayerId(2);

#[derive(Debug, Clone)]
struct Unit {
    owner: PlayerId,
    def: UnitDefId,
    tile: TileId,
    moves_left: u32,
    carried_by: Option<UnitId>,
}

#[derive(Debug, Clone, Copy)]
struct Build {
    def: UnitDefId,
    turns_left: u32,
}

#[derive(Debug, Clone)]
struct City {
    owner: PlayerId,
    tile: TileId,
    build: Option<Build>,
}

enum Entry {
    Walk,
    Board(UnitId),
}

#[derive(Debug, Clone)]
pub struct GridWorld {
    map: GridMap,
    catalogue: Catalogue,
    units: BTreeMap<UnitId, Unit>,
    cities: BTreeMap<CityId, City>,
    next_unit: u32,
    next_city: u32,
}

impl GridWorld {
    pub fn new(map: GridMap, catalogue: Catalogue) -> Self {
        Self {
            map,
            catalogue,
            units: BTreeMap::new(),
            cities: BTreeMap::new(),
            next_unit: 0,
            next_city: 0,
        }
    }

    /// Parse a map drawn one character per tile, using the standard catalogue.
    ///
    /// | symbol | meaning |
    /// |---|---|
    /// | `.` | land |
    /// | `~` | coastal water |
    /// | `#` | deep water (impassable) |
    /// | `C` / `c` | city on land |
    /// | `W` / `w` | warrior on land |
    /// | `S` / `s` | settler on land |
    /// | `G` / `g` | galley on water |
    /// | `T` / `t` | trireme on water |
    ///
    /// Upper case belongs to [`HOME`], lower case to [`RIVAL`]. Units are numbered in
    /// reading order, starting at `unit#1`; cities likewise from `city#1`.
    pub fn from_ascii(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let width = rows.first().map(|r| r.chars().count()).ok_or(MapError::Empty)?;

        let mut terrain = Vec::with_capacity(width * rows.len());
        let mut placements = Vec::new();
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let t = match symbol {
                    '.' | 'C' | 'c' | 'W' | 'w' | 'S' | 's' => Terrain::Land,
                    '~' | 'G' | 'g' | 'T' | 't' => Terrain::Water,
                    '#' => Terrain::DeepWater,
                    _ => return Err(MapError::UnknownSymbol { symbol, row, col }),
                };
                terrain.push(t);
                if !matches!(symbol, '.' | '~' | '#') {
                    placements.push((symbol, col as i32, row as i32));
                }
            }
        }

        let map = GridMap::new(width as u32, rows.len() as u32, terrain).ok_or(MapError::Empty)?;
        let mut world = Self::new(map, Catalogue::standard());

        // Cities first so transports can be placed in ports and units numbered stably.
        for &(symbol, x, y) in &placements {
            if symbol.eq_ignore_ascii_case(&'c') {
                world.found_city(owner_of(symbol), x, y)?;
            }
        }
        for &(symbol, x, y) in &placements {
            let name = match symbol.to_ascii_lowercase() {
                'w' => "warrior",
                's' => "settler",
                'g' => "galley",
                't' => "trireme",
                _ => continue,
            };
            world.spawn(owner_of(symbol), name, x, y)?;
        }
        Ok(world)
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        self.map.tile(x, y)
    }

    pub fn coords(&self, tile: TileId) -> (i32, i32) {
        self.map.coords(tile)
    }

    pub fn spawn(&mut self, owner: PlayerId, name: &str, x: i32, y: i32) -> Result<UnitId, MapError> {
        let spec = self
            .catalogue
            .by_name(name)
            .ok_or_else(|| MapError::UnknownUnit(name.to_string()))?;
        let (def, domain, moves) = (spec.def.id, spec.def.domain, spec.moves);
        let tile = self.map.tile(x, y).ok_or(MapError::OutOfBounds { x, y })?;
        if !self.passable(domain, tile, owner) {
            return Err(MapError::BadPlacement {
                unit: name.to_string(),
                x,
                y,
            });
        }
        Ok(self.insert_unit(owner, def, tile, moves))
    }

    pub fn found_city(&mut self, owner: PlayerId, x: i32, y: i32) -> Result<CityId, MapError> {
        let tile = self.map.tile(x, y).ok_or(MapError::OutOfBounds { x, y })?;
        if self.map.terrain(tile) != Some(Terrain::Land) {
            return Err(MapError::BadPlacement {
                unit: "city".to_string(),
                x,
                y,
            });
        }
        self.next_city += 1;
        let id = CityId(self.next_city);
        self.cities.insert(
            id,
            City {
                owner,
                tile,
                build: None,
            },
        );
        Ok(id)
    }

    /// Remove a unit; anything it carried goes down with it.
    pub fn kill(&mut self, unit: UnitId) {
        if self.units.remove(&unit).is_some() {
            let cargo = self.carried_units(unit);
            for c in cargo {
                self.units.remove(&c);
            }
            debug!(%unit, "unit removed");
        }
    }

    pub fn unit_owner(&self, unit: UnitId) -> Option<PlayerId> {
        self.units.get(&unit).map(|u| u.owner)
    }

    pub fn carrier(&self, unit: UnitId) -> Option<UnitId> {
        self.units.get(&unit).and_then(|u| u.carried_by)
    }

    /// Finish production and refresh movement points. Returns units built this turn.
    pub fn end_turn(&mut self) -> Vec<UnitId> {
        let mut finished = Vec::new();
        for (id, city) in self.cities.iter_mut() {
            let Some(build) = city.build.as_mut() else {
                continue;
            };
            build.turns_left = build.turns_left.saturating_sub(1);
            if build.turns_left == 0 {
                finished.push((*id, city.owner, build.def, city.tile));
                city.build = None;
            }
        }

        let mut built = Vec::new();
        for (city, owner, def, tile) in finished {
            let moves = self.catalogue.get(def).map_or(0, |s| s.moves);
            let unit = self.insert_unit(owner, def, tile, moves);
            debug!(%city, %unit, %def, "production finished");
            built.push(unit);
        }

        for unit in self.units.values_mut() {
            unit.moves_left = self.catalogue.get(unit.def).map_or(0, |s| s.moves);
        }
        built
    }

    fn insert_unit(&mut self, owner: PlayerId, def: UnitDefId, tile: TileId, moves: u32) -> UnitId {
        self.next_unit += 1;
        let id = UnitId(self.next_unit);
        self.units.insert(
            id,
            Unit {
                owner,
                def,
                tile,
                moves_left: moves,
                carried_by: None,
            },
        );
        id
    }

    fn domain_of(&self, def: UnitDefId) -> Domain {
        self.catalogue.get(def).map_or(Domain::Land, |s| s.def.domain)
    }

    /// Static passability: terrain and ports only, no transports.
    fn passable(&self, domain: Domain, tile: TileId, owner: PlayerId) -> bool {
        match self.map.terrain(tile) {
            None | Some(Terrain::DeepWater) => false,
            Some(Terrain::Water) => domain.can_enter(true),
            Some(Terrain::Land) => {
                domain.can_enter(false)
                    || self
                        .city_at(tile)
                        .and_then(|c| self.cities.get(&c))
                        .is_some_and(|c| c.owner == owner)
            }
        }
    }

    fn room_aboard(&self, transport: UnitId) -> bool {
        let capacity = self
            .units
            .get(&transport)
            .and_then(|t| self.catalogue.get(t.def))
            .map_or(0, |s| s.capacity);
        self.carried_units(transport).len() < capacity
    }

    fn entry(&self, unit: UnitId, tile: TileId) -> Option<Entry> {
        let u = self.units.get(&unit)?;
        let domain = self.domain_of(u.def);
        if self.passable(domain, tile, u.owner) {
            return Some(Entry::Walk);
        }
        if domain != Domain::Land {
            return None;
        }
        self.units
            .iter()
            .find(|(id, t)| {
                t.tile == tile
                    && t.owner == u.owner
                    && **id != unit
                    && self
                        .catalogue
                        .get(t.def)
                        .is_some_and(|s| s.def.has_trait(UnitTrait::Transport))
                    && self.room_aboard(**id)
            })
            .map(|(id, _)| Entry::Board(*id))
    }

    fn step(&mut self, unit: UnitId, tile: TileId) -> bool {
        let Some(u) = self.units.get(&unit) else {
            return false;
        };
        if u.moves_left == 0 || !self.map.neighbours(u.tile).contains(&tile) {
            return false;
        }
        let Some(entry) = self.entry(unit, tile) else {
            return false;
        };
        let cargo = self.carried_units(unit);

        let Some(u) = self.units.get_mut(&unit) else {
            return false;
        };
        let was_carried = u.carried_by;
        u.tile = tile;
        u.moves_left -= 1;
        u.carried_by = match entry {
            Entry::Walk => None,
            Entry::Board(transport) => Some(transport),
        };
        match (was_carried, u.carried_by) {
            (None, Some(transport)) => debug!(%unit, %transport, "embarked"),
            (Some(transport), None) => debug!(%unit, %transport, "disembarked"),
            _ => {}
        }

        for c in cargo {
            if let Some(passenger) = self.units.get_mut(&c) {
                passenger.tile = tile;
            }
        }
        true
    }
}

fn owner_of(symbol: char) -> PlayerId {
    if symbol.is_ascii_uppercase() {
        HOME
    } else {
        RIVAL
    }
}

impl WorldView for GridWorld {
    fn neighbours(&self, tile: TileId) -> Vec<TileId> {
        self.map.neighbours(tile)
    }

    fn distance(&self, a: TileId, b: TileId) -> u32 {
        self.map.distance(a, b)
    }

    fn is_water(&self, tile: TileId) -> bool {
        self.map.terrain(tile).is_some_and(Terrain::is_water)
    }

    fn city_at(&self, tile: TileId) -> Option<CityId> {
        self.cities
            .iter()
            .find(|(_, c)| c.tile == tile)
            .map(|(id, _)| *id)
    }

    fn area(&self, tile: TileId) -> Option<AreaId> {
        self.map.area(tile)
    }

    fn units(&self, player: PlayerId) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|(_, u)| u.owner == player)
            .map(|(id, _)| *id)
            .collect()
    }

    fn unit_tile(&self, unit: UnitId) -> Option<TileId> {
        self.units.get(&unit).map(|u| u.tile)
    }

    fn unit_traits(&self, unit: UnitId) -> Vec<UnitTrait> {
        self.units
            .get(&unit)
            .and_then(|u| self.catalogue.get(u.def))
            .map(|s| s.def.traits.clone())
            .unwrap_or_default()
    }

    fn unit_def(&self, unit: UnitId) -> Option<UnitDefId> {
        self.units.get(&unit).map(|u| u.def)
    }

    fn unit_domain(&self, unit: UnitId) -> Domain {
        self.units
            .get(&unit)
            .map_or(Domain::Land, |u| self.domain_of(u.def))
    }

    fn movement_left(&self, unit: UnitId) -> u32 {
        self.units.get(&unit).map_or(0, |u| u.moves_left)
    }

    fn carried_units(&self, transport: UnitId) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|(_, u)| u.carried_by == Some(transport))
            .map(|(id, _)| *id)
            .collect()
    }

    fn units_at(&self, tile: TileId) -> Vec<UnitId> {
        self.units
            .iter()
            .filter(|(_, u)| u.tile == tile)
            .map(|(id, _)| *id)
            .collect()
    }

    fn find_path(&self, mover: Mover, to: TileId) -> Option<Vec<TileId>> {
        let unit = self.units.get(&mover.unit)?;
        path::a_star(&self.map, unit.tile, to, |t| {
            self.passable(mover.domain, t, unit.owner)
        })
    }

    fn unit_defs(&self, _player: PlayerId) -> Vec<UnitDef> {
        self.catalogue.defs()
    }

    fn cities(&self, player: PlayerId) -> Vec<CityId> {
        self.cities
            .iter()
            .filter(|(_, c)| c.owner == player)
            .map(|(id, _)| *id)
            .collect()
    }

    fn city_tile(&self, city: CityId) -> Option<TileId> {
        self.cities.get(&city).map(|c| c.tile)
    }

    fn city_areas(&self, city: CityId) -> Vec<AreaId> {
        let Some(tile) = self.city_tile(city) else {
            return Vec::new();
        };
        let mut out: Vec<AreaId> = self.map.area(tile).into_iter().collect();
        for n in self.map.neighbours(tile) {
            if self.is_water(n) {
                if let Some(area) = self.map.area(n) {
                    if !out.contains(&area) {
                        out.push(area);
                    }
                }
            }
        }
        out
    }

    fn can_produce(&self, city: CityId, def: UnitDefId) -> bool {
        let (Some(c), Some(spec)) = (self.cities.get(&city), self.catalogue.get(def)) else {
            return false;
        };
        match spec.def.domain {
            Domain::Water => self
                .map
                .neighbours(c.tile)
                .into_iter()
                .any(|n| self.map.terrain(n) == Some(Terrain::Water)),
            _ => true,
        }
    }

    fn current_production(&self, city: CityId) -> Option<UnitDefId> {
        self.cities.get(&city).and_then(|c| c.build).map(|b| b.def)
    }
}

impl WorldMut for GridWorld {
    fn advance(&mut self, unit: UnitId, route: &[TileId]) -> MoveOutcome {
        let Some(u) = self.units.get(&unit) else {
            return MoveOutcome::Blocked;
        };
        if u.moves_left == 0 {
            return MoveOutcome::Stalled;
        }

        let mut moved = 0;
        for &tile in route {
            if self.movement_left(unit) == 0 {
                break;
            }
            if !self.step(unit, tile) {
                if moved == 0 {
                    return MoveOutcome::Blocked;
                }
                break;
            }
            moved += 1;
        }
        MoveOutcome::Moved(moved)
    }

    fn step_onto(&mut self, unit: UnitId, tile: TileId) -> bool {
        self.step(unit, tile)
    }

    fn produce(&mut self, city: CityId, def: UnitDefId) {
        if !self.can_produce(city, def) {
            return;
        }
        let turns = self.catalogue.get(def).map_or(1, |s| s.build_turns);
        if let Some(c) = self.cities.get_mut(&city) {
            if c.build.is_none() {
                c.build = Some(Build {
                    def,
                    turns_left: turns,
                });
                debug!(%city, %def, turns, "production started");
            }
        }
    }
}
