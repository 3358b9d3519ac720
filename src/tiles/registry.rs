use super::autotile::AutotileTable;
use super::types::TileKind;
use std::collections::HashSet;

/// Per-kind tile behavior: which kinds collide and which kinds autotile
#[derive(Debug, Clone, PartialEq)]
pub struct TileRules {
    pub solid: HashSet<TileKind>,
    pub autotile: HashSet<TileKind>,
    pub table: AutotileTable,
}

impl TileRules {
    pub fn new() -> Self {
        Self {
            solid: HashSet::from([TileKind::Grass, TileKind::Stone]),
            autotile: HashSet::from([TileKind::Grass, TileKind::Stone]),
            table: AutotileTable::default(),
        }
    }

    pub fn with_solid(mut self, kinds: impl IntoIterator<Item = TileKind>) -> Self {
        self.solid = kinds.into_iter().collect();
        self
    }

    pub fn with_autotile(mut self, kinds: impl IntoIterator<Item = TileKind>) -> Self {
        self.autotile = kinds.into_iter().collect();
        self
    }

    pub fn with_table(mut self, table: AutotileTable) -> Self {
        self.table = table;
        self
    }

    /// Check if a kind produces collision geometry
    pub fn is_solid(&self, kind: TileKind) -> bool {
        self.solid.contains(&kind)
    }

    pub fn is_autotile(&self, kind: TileKind) -> bool {
        self.autotile.contains(&kind)
    }
}

impl Default for TileRules {
    fn default() -> Self {
        Self::new()
    }
}
