use super::{generator, serialization, serialization::MapError};
use crate::tiles::{OffgridTile, Tile, TileMap, TilePos, DEFAULT_TILE_SIZE};
use bevy::prelude::*;
use std::path::PathBuf;

/// An editor change, applied between simulation ticks
#[derive(Debug, Clone, PartialEq)]
pub enum TileEdit {
    Place(Tile),
    Erase(TilePos),
    PlaceOffgrid(OffgridTile),
    /// Erase off-grid tiles covering a point; `footprint` is the image size used for every tile
    EraseOffgridAt { point: Vec2, footprint: Vec2 },
    Autotile,
}

/// Level resource: owns the tile map, its file and the pending edit queue
#[derive(Resource)]
pub struct LevelManager {
    pub map: TileMap,

    /// JSON file the level is loaded from and saved to
    pub map_path: PathBuf,

    /// Edits queued since the last tick boundary
    pub pending: Vec<TileEdit>,

    /// Set when the map changed since it was last loaded or saved
    pub dirty: bool,

    /// Bumped on every change, so presentation can tell when to rebuild
    pub revision: u64,
}

impl LevelManager {
    pub fn new(map_path: PathBuf) -> Self {
        Self {
            map: TileMap::new(DEFAULT_TILE_SIZE),
            map_path,
            pending: Vec::new(),
            dirty: false,
            revision: 0,
        }
    }

    /// Queue an edit for the next tick boundary
    pub fn queue_edit(&mut self, edit: TileEdit) {
        self.pending.push(edit);
    }

    /// Apply queued edits in order; returns how many were applied
    pub fn apply_pending(&mut self) -> usize {
        if self.pending.is_empty() {
            return 0;
        }

        let edits = std::mem::take(&mut self.pending);
        for edit in &edits {
            match *edit {
                TileEdit::Place(tile) => self.map.place(tile),
                TileEdit::Erase(pos) => {
                    self.map.remove(pos);
                }
                TileEdit::PlaceOffgrid(tile) => self.map.add_offgrid(tile),
                TileEdit::EraseOffgridAt { point, footprint } => {
                    self.map.remove_offgrid_at(point, |_| footprint);
                }
                TileEdit::Autotile => {
                    self.map.autotile();
                }
            }
        }

        self.mark_changed();
        debug!("Applied {} level edits", edits.len());
        edits.len()
    }

    fn mark_changed(&mut self) {
        self.dirty = true;
        self.revision += 1;
    }

    /// Load the level from `map_path`
    ///
    /// A missing file falls back to the demo level. Any other failure keeps
    /// the current map and is returned to the caller.
    pub fn load(&mut self) -> Result<(), MapError> {
        if !serialization::map_exists(&self.map_path) {
            let rules = self.map.rules().clone();
            self.map = generator::demo_level(self.map.tile_size());
            *self.map.rules_mut() = rules;
            info!("No map at {:?}, generated demo level", self.map_path);
        } else {
            match self.map.reload_from(&self.map_path) {
                Ok(()) => info!("Loaded level from {:?}", self.map_path),
                Err(e) => {
                    warn!("Failed to load level {:?}: {}, keeping current map", self.map_path, e);
                    return Err(e);
                }
            }
        }

        self.pending.clear();
        self.dirty = false;
        self.revision += 1;
        Ok(())
    }

    /// Save the level to `map_path`
    pub fn save(&mut self) -> Result<(), MapError> {
        serialization::save_map(&self.map, &self.map_path)?;
        self.dirty = false;
        info!("Saved level to {:?}", self.map_path);
        Ok(())
    }

    /// Get statistics about the level state
    pub fn stats(&self) -> LevelStats {
        LevelStats {
            tiles: self.map.len(),
            offgrid_tiles: self.map.offgrid().len(),
            pending_edits: self.pending.len(),
            dirty: self.dirty,
        }
    }
}

impl Default for LevelManager {
    fn default() -> Self {
        Self::new(PathBuf::from("map.json"))
    }
}

/// Statistics about the current level state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStats {
    pub tiles: usize,
    pub offgrid_tiles: usize,
    pub pending_edits: usize,
    pub dirty: bool,
}

impl std::fmt::Display for LevelStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Tiles: {}, Offgrid: {}, Pending: {}, Dirty: {}",
            self.tiles, self.offgrid_tiles, self.pending_edits, self.dirty
        )
    }
}
