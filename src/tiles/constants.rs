use bevy::math::IVec2;

/// Default pixel edge length of a square tile
pub const DEFAULT_TILE_SIZE: u32 = 16;

/// Offsets of the 3x3 block around a cell, in lookup order
pub const NEIGHBOR_OFFSETS: [IVec2; 9] = [
    IVec2::new(-1, 0),
    IVec2::new(-1, -1),
    IVec2::new(0, -1),
    IVec2::new(1, -1),
    IVec2::new(1, 0),
    IVec2::new(0, 0),
    IVec2::new(-1, 1),
    IVec2::new(0, 1),
    IVec2::new(1, 1),
];

// Orthogonal neighbors (y grows downward)
pub const OFFSET_LEFT: IVec2 = IVec2::new(-1, 0);
pub const OFFSET_RIGHT: IVec2 = IVec2::new(1, 0);
pub const OFFSET_UP: IVec2 = IVec2::new(0, -1);
pub const OFFSET_DOWN: IVec2 = IVec2::new(0, 1);

/// Variant assigned to freshly generated terrain
pub const DEFAULT_TERRAIN_VARIANT: u32 = 1;
