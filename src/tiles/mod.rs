pub mod autotile;
pub mod constants;
pub mod query;
pub mod registry;
pub mod tilemap;
pub mod types;

// Re-export commonly used items
pub use autotile::{AutotileTable, Neighbors};
pub use constants::*;
pub use registry::TileRules;
pub use tilemap::TileMap;
pub use types::{OffgridTile, ParseTilePosError, Tile, TileKey, TileKind, TilePos};
