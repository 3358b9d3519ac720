pub mod animation;
pub mod constants;
pub mod physics;
pub mod player;
pub mod spawning;
pub mod systems;
pub mod types;

pub use animation::{Animation, AnimationClip};
pub use physics::{resolve_axis_separated, update_body, SolidLookup};
pub use player::{jump, update_player};
pub use spawning::*;
pub use systems::*;
pub use types::*;
