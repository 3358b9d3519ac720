pub mod generator;
pub mod loader;
pub mod manager;
pub mod serialization;

// Re-export commonly used items
pub use generator::demo_level;
pub use manager::{LevelManager, LevelStats, TileEdit};
pub use serialization::{
    load_map, load_snapshot, map_exists, save_map, save_snapshot, MapDocument, MapError,
};
