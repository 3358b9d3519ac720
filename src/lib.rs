//! Tile map and platformer physics core.
//!
//! - `tiles` - tile storage, neighborhood queries and autotiling
//! - `entities` - physics bodies, the player state machine and their bevy systems
//! - `world` - map persistence and the level resource the editor mutates between ticks

pub mod entities;
pub mod tiles;
pub mod world;
