use core::cmp::Ordering;
use std::collections::BinaryHeap;

use regent_core::TileId;

use crate::GridMap;

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    tile: TileId,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, TileId, u64) {
        (self.f, self.g, self.tile, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap pops the cheapest node.
        other.key().cmp(&self.key())
    }
}

/// A* over 4-neighbour tiles with unit step cost.
///
/// The start tile is exempt from `passable`. The route excludes `start` and ends at `goal`;
/// it is empty when they are the same tile.
pub(crate) fn a_star(
    map: &GridMap,
    start: TileId,
    goal: TileId,
    passable: impl Fn(TileId) -> bool,
) -> Option<Vec<TileId>> {
    if !map.contains(start) || !map.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }
    if !passable(goal) {
        return None;
    }

    let len = map.len();
    let mut g_score = vec![u32::MAX; len];
    let mut came_from: Vec<Option<TileId>> = vec![None; len];
    let mut open = BinaryHeap::<OpenNode>::new();
    let mut tie: u64 = 0;

    g_score[start.0 as usize] = 0;
    open.push(OpenNode {
        f: map.distance(start, goal),
        g: 0,
        tile: start,
        tie,
    });
    tie += 1;

    while let Some(node) = open.pop() {
        if node.tile == goal {
            return Some(reconstruct(&came_from, start, goal));
        }
        if node.g != g_score[node.tile.0 as usize] {
            // Stale heap entry.
            continue;
        }

        for n in map.neighbours(node.tile) {
            if !passable(n) {
                continue;
            }
            let tentative_g = node.g.saturating_add(1);
            let idx = n.0 as usize;
            if tentative_g >= g_score[idx] {
                continue;
            }
            came_from[idx] = Some(node.tile);
            g_score[idx] = tentative_g;
            open.push(OpenNode {
                f: tentative_g.saturating_add(map.distance(n, goal)),
                g: tentative_g,
                tile: n,
                tie,
            });
            tie += 1;
        }
    }

    None
}

fn reconstruct(came_from: &[Option<TileId>], start: TileId, goal: TileId) -> Vec<TileId> {
    let mut out = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from[current.0 as usize] {
        if prev == start {
            break;
        }
        out.push(prev);
        current = prev;
    }
    out.reverse();
    out
}
