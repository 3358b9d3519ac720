use super::{constants::*, tilemap::TileMap, types::*};
use bevy::log::debug;

/// Set of orthogonal directions holding a same-kind neighbor
///
/// Stored as a bitmask, which is already the canonical (sorted) form of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Neighbors(u8);

impl Neighbors {
    pub const NONE: Neighbors = Neighbors(0);
    pub const LEFT: Neighbors = Neighbors(1);
    pub const RIGHT: Neighbors = Neighbors(1 << 1);
    pub const UP: Neighbors = Neighbors(1 << 2);
    pub const DOWN: Neighbors = Neighbors(1 << 3);
    pub const ALL: Neighbors = Neighbors(0b1111);

    pub const fn union(self, other: Neighbors) -> Neighbors {
        Neighbors(self.0 | other.0)
    }

    pub const fn contains(self, other: Neighbors) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl std::ops::BitOr for Neighbors {
    type Output = Neighbors;

    fn bitor(self, rhs: Neighbors) -> Neighbors {
        self.union(rhs)
    }
}

/// Maps neighbor sets to variant indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutotileTable {
    entries: [Option<u32>; 16],
}

impl AutotileTable {
    pub fn empty() -> Self {
        Self { entries: [None; 16] }
    }

    pub fn with(mut self, neighbors: Neighbors, variant: u32) -> Self {
        self.insert(neighbors, variant);
        self
    }

    pub fn insert(&mut self, neighbors: Neighbors, variant: u32) {
        self.entries[neighbors.bits() as usize] = Some(variant);
    }

    pub fn lookup(&self, neighbors: Neighbors) -> Option<u32> {
        self.entries[neighbors.bits() as usize]
    }
}

impl Default for AutotileTable {
    fn default() -> Self {
        use Neighbors as N;
        Self::empty()
            // Edges and corners of a filled block
            .with(N::RIGHT | N::DOWN, 0)
            .with(N::LEFT | N::RIGHT | N::DOWN, 1)
            .with(N::LEFT | N::DOWN, 2)
            .with(N::LEFT | N::UP | N::DOWN, 3)
            .with(N::LEFT | N::UP, 4)
            .with(N::LEFT | N::UP | N::RIGHT, 5)
            .with(N::RIGHT | N::UP, 6)
            .with(N::RIGHT | N::UP | N::DOWN, 7)
            .with(N::ALL, 8)
            // A single open row renders as a surface
            .with(N::LEFT | N::RIGHT, 1)
            .with(N::RIGHT, 0)
            .with(N::LEFT, 2)
    }
}

impl TileMap {
    /// Same-kind orthogonal neighbors of the tile at `pos`
    pub fn neighbors_of(&self, pos: TilePos, kind: TileKind) -> Neighbors {
        [
            (OFFSET_LEFT, Neighbors::LEFT),
            (OFFSET_RIGHT, Neighbors::RIGHT),
            (OFFSET_UP, Neighbors::UP),
            (OFFSET_DOWN, Neighbors::DOWN),
        ]
        .into_iter()
        .filter(|(offset, _)| {
            pos.offset(*offset)
                .and_then(|cell| self.get(cell))
                .is_some_and(|neighbor| neighbor.kind == kind)
        })
        .fold(Neighbors::NONE, |acc, (_, dir)| acc | dir)
    }

    /// Rewrite the variant of every autotile-eligible tile from its neighbors
    ///
    /// Variants are computed before any is written, so the outcome does not
    /// depend on visit order. Returns how many tiles changed.
    pub fn autotile(&mut self) -> usize {
        let rules = self.rules();
        let updates: Vec<(TilePos, u32)> = self
            .iter()
            .filter(|tile| rules.is_autotile(tile.kind))
            .filter_map(|tile| {
                let neighbors = self.neighbors_of(tile.pos, tile.kind);
                rules
                    .table
                    .lookup(neighbors)
                    .filter(|variant| *variant != tile.variant)
                    .map(|variant| (tile.pos, variant))
            })
            .collect();

        let changed = updates.len();
        for (pos, variant) in updates {
            if let Some(tile) = self.get_mut(pos) {
                tile.variant = variant;
            }
        }
        debug!("Autotile pass rewrote {} tiles", changed);
        changed
    }
}
