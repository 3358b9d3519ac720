use bevy::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Packed form of a `TilePos`, used as the storage key
pub type TileKey = u64;

/// Tile category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Grass,
    Stone,
    Decor,
    LargeDecor,
    Spawners,
}

impl TileKind {
    pub const ALL: [TileKind; 5] = [
        TileKind::Grass,
        TileKind::Stone,
        TileKind::Decor,
        TileKind::LargeDecor,
        TileKind::Spawners,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::Stone => "stone",
            TileKind::Decor => "decor",
            TileKind::LargeDecor => "large_decor",
            TileKind::Spawners => "spawners",
        }
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell position in tile coordinates (not pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a world position (in pixels)
    pub fn from_world(world_pos: Vec2, tile_size: f32) -> Self {
        Self {
            x: (world_pos.x / tile_size).floor() as i32,
            y: (world_pos.y / tile_size).floor() as i32,
        }
    }

    /// World position of the cell's top-left corner (in pixels)
    pub fn to_world(&self, tile_size: f32) -> Vec2 {
        Vec2::new(self.x as f32 * tile_size, self.y as f32 * tile_size)
    }

    /// Neighboring cell, or `None` past the edge of the `i32` grid
    pub fn offset(&self, delta: IVec2) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(delta.x)?,
            self.y.checked_add(delta.y)?,
        ))
    }

    /// Pack both coordinates into one key; every (x, y) gets a distinct key
    pub fn key(&self) -> TileKey {
        ((self.x as u32 as u64) << 32) | (self.y as u32 as u64)
    }

    pub fn from_key(key: TileKey) -> Self {
        Self {
            x: (key >> 32) as u32 as i32,
            y: key as u32 as i32,
        }
    }
}

impl From<(i32, i32)> for TilePos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<IVec2> for TilePos {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<TilePos> for IVec2 {
    fn from(pos: TilePos) -> Self {
        IVec2::new(pos.x, pos.y)
    }
}

/// Textual key form, `"x;y"`
impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTilePosError(pub String);

impl fmt::Display for ParseTilePosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tile position key: {:?}", self.0)
    }
}

impl std::error::Error for ParseTilePosError {}

impl FromStr for TilePos {
    type Err = ParseTilePosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseTilePosError(s.to_string());
        let (x, y) = s.split_once(';').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self::new(x, y))
    }
}

/// A tile placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    pub variant: u32,
    pub pos: TilePos,
}

impl Tile {
    pub fn new(kind: TileKind, variant: u32, pos: impl Into<TilePos>) -> Self {
        Self {
            kind,
            variant,
            pos: pos.into(),
        }
    }

    pub fn id_pair(&self) -> (TileKind, u32) {
        (self.kind, self.variant)
    }
}

/// A decorative tile at a free pixel position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffgridTile {
    pub kind: TileKind,
    pub variant: u32,
    pub pos: Vec2,
}

impl OffgridTile {
    pub fn new(kind: TileKind, variant: u32, pos: Vec2) -> Self {
        Self { kind, variant, pos }
    }

    pub fn id_pair(&self) -> (TileKind, u32) {
        (self.kind, self.variant)
    }
}
