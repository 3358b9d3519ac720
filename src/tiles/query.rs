use super::{constants::NEIGHBOR_OFFSETS, tilemap::contains_point, tilemap::TileMap, types::*};
use bevy::math::{Rect, Vec2};

impl TileMap {
    /// Tiles present in the 3x3 block of cells around the cell containing `pos`
    pub fn tiles_around(&self, pos: Vec2) -> Vec<Tile> {
        let center = self.tile_pos_at(pos);
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|offset| center.offset(*offset))
            .filter_map(|cell| self.get(cell).copied())
            .collect()
    }

    /// Collision rectangles of the solid tiles around `pos`
    pub fn physics_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        self.tiles_around(pos)
            .into_iter()
            .filter(|tile| self.rules().is_solid(tile.kind))
            .map(|tile| self.cell_rect(tile.pos))
            .collect()
    }

    /// Solid tile covering a world point, if any
    pub fn solid_check(&self, pos: Vec2) -> Option<&Tile> {
        let cell = self.tile_pos_at(pos);
        self.get(cell)
            .filter(|tile| self.rules().is_solid(tile.kind))
            .filter(|tile| contains_point(&self.cell_rect(tile.pos), pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_map(radius: i32) -> TileMap {
        let mut map = TileMap::new(16);
        for x in -radius..=radius {
            for y in -radius..=radius {
                map.place(Tile::new(TileKind::Stone, 0, (x, y)));
            }
        }
        map
    }

    #[test]
    fn test_tiles_around_is_bounded() {
        let map = filled_map(6);
        let tiles = map.tiles_around(Vec2::new(40.0, 40.0)); // cell (2, 2)
        assert_eq!(tiles.len(), 9);
        for tile in &tiles {
            assert!((tile.pos.x - 2).abs() <= 1);
            assert!((tile.pos.y - 2).abs() <= 1);
        }
    }

    #[test]
    fn test_tiles_around_order_is_fixed() {
        let map = filled_map(3);
        let tiles = map.tiles_around(Vec2::new(8.0, 8.0)); // cell (0, 0)
        let positions: Vec<TilePos> = tiles.iter().map(|t| t.pos).collect();
        assert_eq!(
            positions,
            vec![
                TilePos::new(-1, 0),
                TilePos::new(-1, -1),
                TilePos::new(0, -1),
                TilePos::new(1, -1),
                TilePos::new(1, 0),
                TilePos::new(0, 0),
                TilePos::new(-1, 1),
                TilePos::new(0, 1),
                TilePos::new(1, 1),
            ]
        );
    }

    #[test]
    fn test_tiles_around_negative_world_pos() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Grass, 0, (-1, -1)));
        map.place(Tile::new(TileKind::Grass, 0, (1, 1)));

        // (-0.5, -0.5) lies in cell (-1, -1), so (1, 1) is two cells away
        let tiles = map.tiles_around(Vec2::new(-0.5, -0.5));
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].pos, TilePos::new(-1, -1));
    }

    #[test]
    fn test_tiles_around_grid_edge() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Grass, 0, (i32::MAX - 1, 0)));
        map.place(Tile::new(TileKind::Grass, 0, (i32::MAX, 0)));
        map.place(Tile::new(TileKind::Grass, 0, (i32::MIN, 0)));

        // Far enough right that the cell saturates to i32::MAX
        let tiles = map.tiles_around(Vec2::new(i32::MAX as f32 * 16.0, 8.0));
        let positions: Vec<TilePos> = tiles.iter().map(|t| t.pos).collect();
        assert_eq!(
            positions,
            vec![TilePos::new(i32::MAX - 1, 0), TilePos::new(i32::MAX, 0)]
        );
    }

    #[test]
    fn test_tiles_around_empty_map() {
        let map = TileMap::new(16);
        assert!(map.tiles_around(Vec2::new(100.0, -3.0)).is_empty());
        assert!(map.physics_rects_around(Vec2::new(100.0, -3.0)).is_empty());
    }

    #[test]
    fn test_physics_rects_skip_non_solid() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Grass, 0, (0, 1)));
        map.place(Tile::new(TileKind::Decor, 0, (1, 1)));
        map.place(Tile::new(TileKind::LargeDecor, 0, (1, 0)));

        assert_eq!(map.tiles_around(Vec2::new(4.0, 4.0)).len(), 3);

        let rects = map.physics_rects_around(Vec2::new(4.0, 4.0));
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].min, Vec2::new(0.0, 16.0));
        assert_eq!(rects[0].max, Vec2::new(16.0, 32.0));
    }

    #[test]
    fn test_solid_check() {
        let mut map = TileMap::new(16);
        map.place(Tile::new(TileKind::Stone, 0, (2, 0)));
        map.place(Tile::new(TileKind::Decor, 0, (3, 0)));

        assert!(map.solid_check(Vec2::new(33.0, 1.0)).is_some());
        assert!(map.solid_check(Vec2::new(49.0, 1.0)).is_none());
        assert!(map.solid_check(Vec2::new(1.0, 1.0)).is_none());
    }
}
