use crate::tiles::{OffgridTile, Tile, TileKind, TileMap, TilePos, TileRules};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

/// Magic number for binary map snapshots ("TMAP" in ASCII)
const MAGIC_NUMBER: [u8; 4] = [b'T', b'M', b'A', b'P'];

/// Current snapshot format version
const VERSION: u16 = 1;

/// Error type for map persistence
#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    Json(serde_json::Error),
    Binary(bincode::Error),
    InvalidMagicNumber,
    InvalidVersion(u16),
    InvalidChecksum,
    MalformedKey(String),
    KeyMismatch { key: String, pos: TilePos },
    InvalidTileSize(u32),
}

impl MapError {
    /// True when the data was readable but not a valid map
    pub fn is_malformed(&self) -> bool {
        !matches!(self, MapError::Io(_))
    }
}

impl From<io::Error> for MapError {
    fn from(err: io::Error) -> Self {
        MapError::Io(err)
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        MapError::Json(err)
    }
}

impl From<bincode::Error> for MapError {
    fn from(err: bincode::Error) -> Self {
        MapError::Binary(err)
    }
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "IO error: {}", e),
            MapError::Json(e) => write!(f, "load failed: malformed data: {}", e),
            MapError::Binary(e) => write!(f, "load failed: malformed data: {}", e),
            MapError::InvalidMagicNumber => write!(f, "load failed: invalid magic number"),
            MapError::InvalidVersion(v) => write!(f, "load failed: invalid version: {}", v),
            MapError::InvalidChecksum => write!(f, "load failed: checksum mismatch"),
            MapError::MalformedKey(k) => write!(f, "load failed: malformed tile key {:?}", k),
            MapError::KeyMismatch { key, pos } => {
                write!(f, "load failed: tile key {:?} does not match pos {}", key, pos)
            }
            MapError::InvalidTileSize(s) => write!(f, "load failed: invalid tile size: {}", s),
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            MapError::Json(e) => Some(e),
            MapError::Binary(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// Persisted on-grid tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u32,
    pub pos: [i32; 2],
}

/// Persisted off-grid tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffgridRecord {
    #[serde(rename = "type")]
    pub kind: TileKind,
    pub variant: u32,
    pub pos: [f32; 2],
}

/// Whole-map document: `{tilemap: {"x;y": tile}, tile_size, offgrid: [tile]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub tilemap: BTreeMap<String, TileRecord>,
    pub tile_size: u32,
    pub offgrid: Vec<OffgridRecord>,
}

impl TileMap {
    pub fn to_document(&self) -> MapDocument {
        let tilemap = self
            .iter()
            .map(|tile| {
                let record = TileRecord {
                    kind: tile.kind,
                    variant: tile.variant,
                    pos: [tile.pos.x, tile.pos.y],
                };
                (tile.pos.to_string(), record)
            })
            .collect();
        let offgrid = self
            .offgrid()
            .iter()
            .map(|tile| OffgridRecord {
                kind: tile.kind,
                variant: tile.variant,
                pos: [tile.pos.x, tile.pos.y],
            })
            .collect();

        MapDocument {
            tilemap,
            tile_size: self.tile_size(),
            offgrid,
        }
    }

    /// Build a map from a document, validating every key against its tile
    pub fn from_document(doc: &MapDocument, rules: TileRules) -> Result<Self, MapError> {
        if doc.tile_size == 0 {
            return Err(MapError::InvalidTileSize(doc.tile_size));
        }

        let mut map = TileMap::with_rules(doc.tile_size, rules);
        for (key, record) in &doc.tilemap {
            let key_pos: TilePos = key
                .parse()
                .map_err(|_| MapError::MalformedKey(key.clone()))?;
            let pos = TilePos::new(record.pos[0], record.pos[1]);
            if key_pos != pos {
                return Err(MapError::KeyMismatch {
                    key: key.clone(),
                    pos,
                });
            }
            map.set(pos, Tile::new(record.kind, record.variant, pos));
        }
        for record in &doc.offgrid {
            map.add_offgrid(OffgridTile::new(
                record.kind,
                record.variant,
                Vec2::new(record.pos[0], record.pos[1]),
            ));
        }
        Ok(map)
    }

    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string(&self.to_document())?)
    }

    pub fn from_json(json: &str, rules: TileRules) -> Result<Self, MapError> {
        let doc: MapDocument = serde_json::from_str(json)?;
        Self::from_document(&doc, rules)
    }

    /// Replace this map's contents from a JSON map file
    ///
    /// On any error the map is left untouched.
    pub fn reload_from<P: AsRef<Path>>(&mut self, path: P) -> Result<(), MapError> {
        let loaded = load_map(path, self.rules().clone())?;
        self.replace_contents(loaded);
        Ok(())
    }
}

/// Save a map as a JSON document
pub fn save_map<P: AsRef<Path>>(map: &TileMap, path: P) -> Result<(), MapError> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    serde_json::to_writer(&mut file, &map.to_document())?;
    file.sync_all()?;
    Ok(())
}

/// Load a map from a JSON document
pub fn load_map<P: AsRef<Path>>(path: P, rules: TileRules) -> Result<TileMap, MapError> {
    let contents = fs::read_to_string(path)?;
    TileMap::from_json(&contents, rules)
}

/// Save a map to disk in binary format
pub fn save_snapshot<P: AsRef<Path>>(map: &TileMap, path: P) -> Result<(), MapError> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = bincode::serialize(&map.to_document())?;

    let mut file = File::create(path)?;

    // Write header
    file.write_all(&MAGIC_NUMBER)?;
    file.write_all(&VERSION.to_le_bytes())?;
    file.write_all(&(payload.len() as u64).to_le_bytes())?;

    file.write_all(&payload)?;

    // Calculate and write checksum (CRC32)
    let checksum = crc32fast::hash(&payload);
    file.write_all(&checksum.to_le_bytes())?;

    file.sync_all()?;
    Ok(())
}

/// Load a map from a binary snapshot
pub fn load_snapshot<P: AsRef<Path>>(path: P, rules: TileRules) -> Result<TileMap, MapError> {
    let mut file = File::open(path)?;

    // Read and verify magic number
    let mut magic = [0u8; 4];
    file.read_exact(&mut magic)?;
    if magic != MAGIC_NUMBER {
        return Err(MapError::InvalidMagicNumber);
    }

    // Read and verify version
    let mut version_bytes = [0u8; 2];
    file.read_exact(&mut version_bytes)?;
    let version = u16::from_le_bytes(version_bytes);
    if version != VERSION {
        return Err(MapError::InvalidVersion(version));
    }

    let mut len_bytes = [0u8; 8];
    file.read_exact(&mut len_bytes)?;
    let len = u64::from_le_bytes(len_bytes) as usize;

    let mut payload = Vec::new();
    Read::by_ref(&mut file).take(len as u64).read_to_end(&mut payload)?;
    if payload.len() != len {
        return Err(MapError::InvalidChecksum);
    }

    // Read and verify checksum
    let mut checksum_bytes = [0u8; 4];
    file.read_exact(&mut checksum_bytes)?;
    let expected_checksum = u32::from_le_bytes(checksum_bytes);
    if crc32fast::hash(&payload) != expected_checksum {
        return Err(MapError::InvalidChecksum);
    }

    let doc: MapDocument = bincode::deserialize(&payload)?;
    TileMap::from_document(&doc, rules)
}

/// Check if a map file exists
pub fn map_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}
