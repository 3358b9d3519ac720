use crate::tiles::{Tile, TileKind, TileMap, DEFAULT_TERRAIN_VARIANT};

/// Starter level used when no map file exists
/// A grass floor across cells (3..=12, 10) and a stone pillar at (10, 5..=14)
pub fn demo_level(tile_size: u32) -> TileMap {
    let mut map = TileMap::new(tile_size);

    for i in 0..10 {
        map.place(Tile::new(TileKind::Grass, DEFAULT_TERRAIN_VARIANT, (3 + i, 10)));
        map.place(Tile::new(TileKind::Stone, DEFAULT_TERRAIN_VARIANT, (10, 5 + i)));
    }

    map
}
