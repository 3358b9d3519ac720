/// Added to vertical velocity every tick
pub const GRAVITY: f32 = 0.1;

/// Maximum downward velocity
pub const TERMINAL_VELOCITY: f32 = 5.0;

/// Horizontal velocity lost per tick
pub const FRICTION: f32 = 0.1;

/// Vertical velocity of a normal jump (negative is up)
pub const JUMP_VELOCITY: f32 = -4.0;

/// Horizontal launch speed of a wall jump, away from the wall
pub const WALL_JUMP_PUSH: f32 = 3.5;

/// Vertical velocity of a wall jump
pub const WALL_JUMP_VELOCITY: f32 = -3.0;

/// Fall speed cap while sliding down a wall
pub const WALL_SLIDE_MAX_FALL: f32 = 0.5;

/// Airborne ticks after which wall contact counts as a wall slide
pub const WALL_SLIDE_AIR_TICKS: u32 = 4;

/// Airborne counter value set by any jump
pub const JUMP_AIR_TICKS: u32 = 5;

/// Jump budget refilled on landing
pub const MAX_JUMPS: u32 = 2;

/// Jump budget of a freshly spawned player
pub const INITIAL_JUMPS: u32 = 1;

/// Player hitbox in pixels
pub const PLAYER_SIZE: (f32, f32) = (8.0, 15.0);

/// Player spawn point in world pixels
pub const PLAYER_SPAWN: (f32, f32) = (50.0, 50.0);

/// Simulation ticks per second
pub const TICK_RATE_HZ: f64 = 60.0;
