use super::{constants::*, registry::TileRules, types::*};
use bevy::math::{Rect, Vec2};
use std::collections::HashMap;

/// Sparse tile storage: keyed on-grid tiles plus an ordered list of off-grid decorations
#[derive(Debug, Clone, PartialEq)]
pub struct TileMap {
    tile_size: u32,
    tiles: HashMap<TileKey, Tile>,
    offgrid: Vec<OffgridTile>,
    rules: TileRules,
}

impl TileMap {
    pub fn new(tile_size: u32) -> Self {
        Self::with_rules(tile_size, TileRules::default())
    }

    pub fn with_rules(tile_size: u32, rules: TileRules) -> Self {
        Self {
            tile_size,
            tiles: HashMap::new(),
            offgrid: Vec::new(),
            rules,
        }
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn rules(&self) -> &TileRules {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut TileRules {
        &mut self.rules
    }

    /// Insert or overwrite the tile at `pos`
    ///
    /// The tile is stored as given; callers keep `tile.pos == pos`.
    pub fn set(&mut self, pos: TilePos, tile: Tile) {
        self.tiles.insert(pos.key(), tile);
    }

    /// Insert a tile at its own position
    pub fn place(&mut self, tile: Tile) {
        self.set(tile.pos, tile);
    }

    /// Remove the tile at `pos`; absent cells are a no-op
    pub fn remove(&mut self, pos: TilePos) -> Option<Tile> {
        self.tiles.remove(&pos.key())
    }

    pub fn get(&self, pos: TilePos) -> Option<&Tile> {
        self.tiles.get(&pos.key())
    }

    pub fn get_mut(&mut self, pos: TilePos) -> Option<&mut Tile> {
        self.tiles.get_mut(&pos.key())
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.tiles.contains_key(&pos.key())
    }

    /// Number of on-grid tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// No on-grid tiles; off-grid tiles are not counted, same as `len`
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// On-grid tiles in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn offgrid(&self) -> &[OffgridTile] {
        &self.offgrid
    }

    pub fn add_offgrid(&mut self, tile: OffgridTile) {
        self.offgrid.push(tile);
    }

    /// Remove the first off-grid tile equal to `tile`
    pub fn remove_offgrid(&mut self, tile: &OffgridTile) -> bool {
        match self.offgrid.iter().position(|t| t == tile) {
            Some(index) => {
                self.offgrid.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every off-grid tile whose footprint contains `point`
    ///
    /// `footprint` gives the pixel size of a tile's image.
    pub fn remove_offgrid_at(
        &mut self,
        point: Vec2,
        footprint: impl Fn(&OffgridTile) -> Vec2,
    ) -> usize {
        let before = self.offgrid.len();
        self.offgrid.retain(|tile| {
            let area = Rect::from_corners(tile.pos, tile.pos + footprint(tile));
            !contains_point(&area, point)
        });
        before - self.offgrid.len()
    }

    /// Collect on-grid tiles whose (kind, variant) is in `id_pairs`
    ///
    /// Matches are removed from the map unless `keep` is set. The result is
    /// ordered by position.
    pub fn extract(&mut self, id_pairs: &[(TileKind, u32)], keep: bool) -> Vec<Tile> {
        let mut keys: Vec<TileKey> = self
            .tiles
            .iter()
            .filter(|(_, tile)| id_pairs.contains(&tile.id_pair()))
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| TilePos::from_key(*key));

        let mut matches = Vec::with_capacity(keys.len());
        for key in keys {
            let tile = if keep {
                self.tiles.get(&key).copied()
            } else {
                self.tiles.remove(&key)
            };
            matches.extend(tile);
        }
        matches
    }

    /// Same as `extract`, for off-grid tiles (in placement order)
    pub fn extract_offgrid(&mut self, id_pairs: &[(TileKind, u32)], keep: bool) -> Vec<OffgridTile> {
        let matches: Vec<OffgridTile> = self
            .offgrid
            .iter()
            .filter(|tile| id_pairs.contains(&tile.id_pair()))
            .copied()
            .collect();
        if !keep {
            self.offgrid.retain(|tile| !id_pairs.contains(&tile.id_pair()));
        }
        matches
    }

    /// Cell under a world position
    pub fn tile_pos_at(&self, world_pos: Vec2) -> TilePos {
        TilePos::from_world(world_pos, self.tile_size as f32)
    }

    /// Pixel rectangle covered by a cell
    pub fn cell_rect(&self, pos: TilePos) -> Rect {
        let size = self.tile_size as f32;
        let min = pos.to_world(size);
        Rect::from_corners(min, min + Vec2::splat(size))
    }

    /// Replace tiles and off-grid tiles wholesale, keeping the rules
    pub(crate) fn replace_contents(&mut self, other: TileMap) {
        self.tile_size = other.tile_size;
        self.tiles = other.tiles;
        self.offgrid = other.offgrid;
    }
}

impl Default for TileMap {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_SIZE)
    }
}

pub(crate) fn contains_point(rect: &Rect, point: Vec2) -> bool {
    point.x >= rect.min.x && point.x < rect.max.x && point.y >= rect.min.y && point.y < rect.max.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut map = TileMap::new(16);
        let tile = Tile::new(TileKind::Grass, 1, (3, 10));

        map.set(TilePos::new(3, 10), tile);
        assert_eq!(map.get(TilePos::new(3, 10)), Some(&tile));
        assert_eq!(map.len(), 1);

        // Overwrite silently replaces
        let stone = Tile::new(TileKind::Stone, 0, (3, 10));
        map.set(TilePos::new(3, 10), stone);
        assert_eq!(map.get(TilePos::new(3, 10)), Some(&stone));
        assert_eq!(map.len(), 1);

        assert_eq!(map.remove(TilePos::new(3, 10)), Some(stone));
        assert_eq!(map.get(TilePos::new(3, 10)), None);

        // Removing an absent cell is a no-op
        assert_eq!(map.remove(TilePos::new(3, 10)), None);
    }

    #[test]
    fn test_negative_coordinates() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Stone, 2, (-1, -1)));
        map.place(Tile::new(TileKind::Grass, 0, (1, 1)));

        assert_eq!(map.get(TilePos::new(-1, -1)).map(|t| t.kind), Some(TileKind::Stone));
        assert_eq!(map.get(TilePos::new(1, 1)).map(|t| t.kind), Some(TileKind::Grass));
        assert!(!map.contains(TilePos::new(-1, 1)));
    }

    #[test]
    fn test_offgrid_add_remove() {
        let mut map = TileMap::new(16);
        let bush = OffgridTile::new(TileKind::Decor, 2, Vec2::new(10.5, 20.25));

        map.add_offgrid(bush);
        map.add_offgrid(bush);
        assert_eq!(map.offgrid().len(), 2);
        // Off-grid tiles are not part of the grid count
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());

        assert!(map.remove_offgrid(&bush));
        assert_eq!(map.offgrid().len(), 1);
        assert!(map.remove_offgrid(&bush));
        assert!(!map.remove_offgrid(&bush));
        assert!(map.offgrid().is_empty());
    }

    #[test]
    fn test_remove_offgrid_at() {
        let mut map = TileMap::new(16);
        map.add_offgrid(OffgridTile::new(TileKind::Decor, 0, Vec2::new(0.0, 0.0)));
        map.add_offgrid(OffgridTile::new(TileKind::LargeDecor, 0, Vec2::new(100.0, 0.0)));

        let removed = map.remove_offgrid_at(Vec2::new(4.0, 4.0), |_| Vec2::new(8.0, 8.0));
        assert_eq!(removed, 1);
        assert_eq!(map.offgrid()[0].kind, TileKind::LargeDecor);

        let removed = map.remove_offgrid_at(Vec2::new(50.0, 50.0), |_| Vec2::new(8.0, 8.0));
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_extract_removes_matches() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Spawners, 0, (5, 1)));
        map.place(Tile::new(TileKind::Spawners, 1, (2, 3)));
        map.place(Tile::new(TileKind::Spawners, 2, (7, 7)));
        map.place(Tile::new(TileKind::Grass, 0, (0, 0)));

        let found = map.extract(&[(TileKind::Spawners, 0), (TileKind::Spawners, 1)], false);
        assert_eq!(
            found.iter().map(|t| t.pos).collect::<Vec<_>>(),
            vec![TilePos::new(2, 3), TilePos::new(5, 1)]
        );
        assert!(!map.contains(TilePos::new(5, 1)));
        assert!(!map.contains(TilePos::new(2, 3)));
        assert!(map.contains(TilePos::new(7, 7)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_extract_keep() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Spawners, 0, (5, 1)));

        let found = map.extract(&[(TileKind::Spawners, 0)], true);
        assert_eq!(found.len(), 1);
        assert!(map.contains(TilePos::new(5, 1)));
    }

    #[test]
    fn test_extract_offgrid() {
        let mut map = TileMap::new(16);
        map.add_offgrid(OffgridTile::new(TileKind::Spawners, 0, Vec2::new(1.0, 2.0)));
        map.add_offgrid(OffgridTile::new(TileKind::Decor, 0, Vec2::new(3.0, 4.0)));

        let found = map.extract_offgrid(&[(TileKind::Spawners, 0)], false);
        assert_eq!(found.len(), 1);
        assert_eq!(map.offgrid().len(), 1);
        assert_eq!(map.offgrid()[0].kind, TileKind::Decor);
    }

    #[test]
    fn test_cell_rect() {
        let map = TileMap::new(16);
        let rect = map.cell_rect(TilePos::new(2, -1));
        assert_eq!(rect.min, Vec2::new(32.0, -16.0));
        assert_eq!(rect.max, Vec2::new(48.0, 0.0));
        assert_eq!(map.tile_pos_at(Vec2::new(40.0, -1.0)), TilePos::new(2, -1));
    }
}
