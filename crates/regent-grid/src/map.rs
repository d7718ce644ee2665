use std::collections::VecDeque;

use regent_core::{AreaId, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Land,
    Water,
    /// Water no unit can enter.
    DeepWater,
}

impl Terrain {
    pub fn is_water(self) -> bool {
        !matches!(self, Terrain::Land)
    }
}

/// Terrain plus precomputed connectivity regions.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    terrain: Vec<Terrain>,
    areas: Vec<Option<AreaId>>,
}

impl GridMap {
    /// `terrain` is row-major, `width * height` long.
    pub fn new(width: u32, height: u32, terrain: Vec<Terrain>) -> Option<Self> {
        if width == 0 || height == 0 || terrain.len() != (width * height) as usize {
            return None;
        }
        let mut map = Self {
            width: width as i32,
            height: height as i32,
            terrain,
            areas: Vec::new(),
        };
        map.recompute_areas();
        Some(map)
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn len(&self) -> usize {
        self.terrain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terrain.is_empty()
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<TileId> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(TileId((y * self.width + x) as u32))
    }

    pub fn coords(&self, tile: TileId) -> (i32, i32) {
        let idx = tile.0 as i32;
        (idx % self.width, idx / self.width)
    }

    pub fn contains(&self, tile: TileId) -> bool {
        (tile.0 as usize) < self.terrain.len()
    }

    pub fn terrain(&self, tile: TileId) -> Option<Terrain> {
        self.terrain.get(tile.0 as usize).copied()
    }

    pub fn set_terrain(&mut self, tile: TileId, terrain: Terrain) {
        if let Some(slot) = self.terrain.get_mut(tile.0 as usize) {
            *slot = terrain;
            self.recompute_areas();
        }
    }

    pub fn area(&self, tile: TileId) -> Option<AreaId> {
        self.areas.get(tile.0 as usize).copied().flatten()
    }

    /// Fixed order for determinism: N, E, S, W.
    pub fn neighbours(&self, tile: TileId) -> Vec<TileId> {
        if !self.contains(tile) {
            return Vec::new();
        }
        let (x, y) = self.coords(tile);
        [(x, y - 1), (x + 1, y), (x, y + 1), (x - 1, y)]
            .into_iter()
            .filter_map(|(nx, ny)| self.tile(nx, ny))
            .collect()
    }

    pub fn distance(&self, a: TileId, b: TileId) -> u32 {
        let (ax, ay) = self.coords(a);
        let (bx, by) = self.coords(b);
        ((ax - bx).abs() + (ay - by).abs()) as u32
    }

    /// Flood fill land and coastal water separately. Deep water gets no region.
    fn recompute_areas(&mut self) {
        self.areas = vec![None; self.terrain.len()];
        let mut next = 1u32;
        for start in 0..self.terrain.len() {
            let class = self.terrain[start];
            if class == Terrain::DeepWater || self.areas[start].is_some() {
                continue;
            }
            let id = AreaId(next);
            next += 1;

            let mut queue = VecDeque::from([TileId(start as u32)]);
            self.areas[start] = Some(id);
            while let Some(tile) = queue.pop_front() {
                for n in self.neighbours(tile) {
                    let idx = n.0 as usize;
                    if self.areas[idx].is_none() && self.terrain[idx] == class {
                        self.areas[idx] = Some(id);
                        queue.push_back(n);
                    }
                }
            }
        }
    }
}
