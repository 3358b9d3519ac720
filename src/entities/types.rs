use super::constants::*;
use bevy::prelude::*;

/// Contacts found by the last collision pass; recomputed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn horizontal(&self) -> bool {
        self.left || self.right
    }

    pub fn vertical(&self) -> bool {
        self.up || self.down
    }
}

/// Kinematic state shared by every simulated body
///
/// `position` is the top-left corner of the bounding box, y grows downward.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub position: Vec2,
    pub size: Vec2,
    pub velocity: Vec2,
    pub collisions: CollisionFlags,
    /// Facing left; follows the last nonzero horizontal intent
    pub flip: bool,
    /// Intent passed to the most recent update
    pub last_movement: Vec2,
}

impl PhysicsBody {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            velocity: Vec2::ZERO,
            collisions: CollisionFlags::default(),
            flip: false,
            last_movement: Vec2::ZERO,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }
}

/// Animation label derived from the player state each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    #[default]
    Idle,
    Run,
    Jump,
    WallJump,
}

impl PlayerAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayerAction::Idle => "idle",
            PlayerAction::Run => "run",
            PlayerAction::Jump => "jump",
            PlayerAction::WallJump => "wall_jump",
        }
    }
}

/// Player state wrapping a physics body
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub body: PhysicsBody,
    pub air_time: u32,
    pub jumps: u32,
    pub wall_slide: bool,
    pub action: PlayerAction,
}

impl Player {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            body: PhysicsBody::new(position, size),
            air_time: 0,
            jumps: INITIAL_JUMPS,
            wall_slide: false,
            action: PlayerAction::Idle,
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Vec2::from(PLAYER_SPAWN), Vec2::from(PLAYER_SIZE))
    }
}

/// Movement constants used by the tick functions
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub friction: f32,
    pub jump_velocity: f32,
    pub wall_jump_push: f32,
    pub wall_jump_velocity: f32,
    pub wall_slide_max_fall: f32,
    pub wall_slide_air_ticks: u32,
    pub jump_air_ticks: u32,
    pub max_jumps: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            friction: FRICTION,
            jump_velocity: JUMP_VELOCITY,
            wall_jump_push: WALL_JUMP_PUSH,
            wall_jump_velocity: WALL_JUMP_VELOCITY,
            wall_slide_max_fall: WALL_SLIDE_MAX_FALL,
            wall_slide_air_ticks: WALL_SLIDE_AIR_TICKS,
            jump_air_ticks: JUMP_AIR_TICKS,
            max_jumps: MAX_JUMPS,
        }
    }
}

/// Input for one simulation tick
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Horizontal/vertical intent in pixels per tick
    pub movement: Vec2,
    /// Latched until the next tick consumes it
    pub jump_requested: bool,
}
