//! A* frontier: a binary min-heap with lazy deletion.
//!
//! `BinaryHeap` has no decrease-key. When a cheaper route to an open tile is
//! found, [`OpenSet::relax`] records the new best g in a side map and pushes
//! a fresh entry; the superseded entry stays in the heap and is discarded by
//! [`OpenSet::pop`] when it surfaces. Entries for closed tiles are discarded
//! the same way.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use warfront_core::TileCoord;

/// Best known route to a tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct NodeRecord {
    pub g: f64,
    pub parent: Option<TileCoord>,
}

#[derive(Clone, Copy, Debug)]
struct OpenEntry {
    f: f64,
    h: f64,
    g: f64,
    seq: u64,
    tile: TileCoord,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    // Reversed: the max-heap pops the lowest f, then lowest h, then the
    // earliest push.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A tile taken off the frontier for expansion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Popped {
    pub tile: TileCoord,
    pub g: f64,
}

/// Open heap, best-g mirror, and closed set for one search.
#[derive(Debug, Default)]
pub(crate) struct OpenSet {
    heap: BinaryHeap<OpenEntry>,
    nodes: HashMap<TileCoord, NodeRecord>,
    closed: HashSet<TileCoord>,
    seq: u64,
    pushes: u64,
    stale_pops: u64,
}

impl OpenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a route of cost `g` to `tile` via `parent`.
    ///
    /// Ignored if the tile is closed or already has a route at least as
    /// cheap. Returns whether the route was accepted.
    pub fn relax(&mut self, tile: TileCoord, g: f64, h: f64, parent: Option<TileCoord>) -> bool {
        if self.closed.contains(&tile) {
            return false;
        }
        if let Some(existing) = self.nodes.get(&tile) {
            if existing.g <= g {
                return false;
            }
        }
        self.nodes.insert(tile, NodeRecord { g, parent });
        self.heap.push(OpenEntry {
            f: g + h,
            h,
            g,
            seq: self.seq,
            tile,
        });
        self.seq += 1;
        self.pushes += 1;
        true
    }

    /// Remove and close the best open tile, skipping stale entries.
    pub fn pop(&mut self) -> Option<Popped> {
        while let Some(entry) = self.heap.pop() {
            if self.closed.contains(&entry.tile) {
                self.stale_pops += 1;
                continue;
            }
            let best = self.nodes.get(&entry.tile).map_or(f64::INFINITY, |n| n.g);
            if entry.g > best {
                self.stale_pops += 1;
                continue;
            }
            self.closed.insert(entry.tile);
            return Some(Popped {
                tile: entry.tile,
                g: entry.g,
            });
        }
        None
    }

    pub fn is_closed(&self, tile: TileCoord) -> bool {
        self.closed.contains(&tile)
    }

    #[cfg(test)]
    pub fn node(&self, tile: TileCoord) -> Option<&NodeRecord> {
        self.nodes.get(&tile)
    }

    /// Tiles from `goal` back to the root, following parent links, in
    /// start → goal order.
    pub fn trace_back(&self, goal: TileCoord) -> Vec<TileCoord> {
        let mut tiles = vec![goal];
        let mut current = goal;
        while let Some(parent) = self.nodes.get(&current).and_then(|n| n.parent) {
            tiles.push(parent);
            current = parent;
        }
        tiles.reverse();
        tiles
    }

    pub fn pushes(&self) -> u64 {
        self.pushes
    }

    pub fn stale_pops(&self) -> u64 {
        self.stale_pops
    }
}
