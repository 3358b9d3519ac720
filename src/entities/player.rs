use super::physics::{update_body, SolidLookup};
use super::types::{PhysicsTuning, Player, PlayerAction};
use bevy::math::Vec2;

/// Advance the player by one tick
pub fn update_player<L: SolidLookup + ?Sized>(
    player: &mut Player,
    solids: &L,
    movement: Vec2,
    tuning: &PhysicsTuning,
) {
    update_body(&mut player.body, solids, movement, tuning);

    player.air_time = player.air_time.saturating_add(1);
    if player.body.collisions.down {
        player.air_time = 0;
        player.jumps = tuning.max_jumps;
    }

    let collisions = player.body.collisions;
    player.wall_slide = collisions.horizontal() && player.air_time > tuning.wall_slide_air_ticks;
    if player.wall_slide {
        player.body.velocity.y = player.body.velocity.y.min(tuning.wall_slide_max_fall);
        player.body.flip = !collisions.right;
    }

    player.action = derive_action(player, tuning, movement);
}

fn derive_action(player: &Player, tuning: &PhysicsTuning, movement: Vec2) -> PlayerAction {
    if player.wall_slide {
        PlayerAction::WallJump
    } else if player.air_time > tuning.wall_slide_air_ticks {
        PlayerAction::Jump
    } else if movement.x != 0.0 {
        PlayerAction::Run
    } else {
        PlayerAction::Idle
    }
}

/// Try to jump; returns false and changes nothing when no jump is possible
///
/// While wall sliding only a wall jump is allowed, and only when the player
/// is still pushing into the wall.
pub fn jump(player: &mut Player, tuning: &PhysicsTuning) -> bool {
    let body = &mut player.body;
    if player.wall_slide {
        let push = if body.flip && body.last_movement.x < 0.0 {
            tuning.wall_jump_push
        } else if !body.flip && body.last_movement.x > 0.0 {
            -tuning.wall_jump_push
        } else {
            return false;
        };
        body.velocity.x = push;
        body.velocity.y = tuning.wall_jump_velocity;
        player.air_time = tuning.jump_air_ticks;
        player.jumps = player.jumps.saturating_sub(1);
        return true;
    }

    if player.jumps > 0 {
        player.jumps -= 1;
        body.velocity.y = tuning.jump_velocity;
        player.air_time = tuning.jump_air_ticks;
        return true;
    }

    false
}

impl Player {
    pub fn update<L: SolidLookup + ?Sized>(&mut self, solids: &L, movement: Vec2, tuning: &PhysicsTuning) {
        update_player(self, solids, movement, tuning);
    }

    pub fn jump(&mut self, tuning: &PhysicsTuning) -> bool {
        jump(self, tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Tile, TileKind, TileMap};
    use bevy::math::Rect;

    fn ground_map() -> TileMap {
        let mut map = TileMap::new(16);
        for x in -2..8 {
            map.place(Tile::new(TileKind::Grass, 1, (x, 4)));
        }
        // Wall on the right side
        for y in 0..4 {
            map.place(Tile::new(TileKind::Stone, 1, (6, y)));
        }
        map
    }

    #[test]
    fn test_normal_jump() {
        let tuning = PhysicsTuning::default();
        let mut player = Player::new(Vec2::ZERO, Vec2::new(8.0, 15.0));
        player.jumps = 2;

        assert!(player.jump(&tuning));
        assert_eq!(player.body.velocity.y, -4.0);
        assert_eq!(player.jumps, 1);
        assert_eq!(player.air_time, 5);
    }

    #[test]
    fn test_jump_without_budget_fails() {
        let tuning = PhysicsTuning::default();
        let mut player = Player::new(Vec2::ZERO, Vec2::new(8.0, 15.0));
        player.jumps = 0;
        player.air_time = 9;
        let before = player;

        assert!(!player.jump(&tuning));
        assert_eq!(player, before);
    }

    #[test]
    fn test_landing_refills_jumps() {
        let tuning = PhysicsTuning::default();
        let map = ground_map();
        // Feet just above the grass row at y = 64
        let mut player = Player::new(Vec2::new(20.0, 48.0), Vec2::new(8.0, 15.0));
        player.jumps = 0;
        player.air_time = 30;

        for _ in 0..20 {
            player.update(&map, Vec2::ZERO, &tuning);
            if player.body.collisions.down {
                break;
            }
        }
        assert!(player.body.collisions.down);
        assert_eq!(player.jumps, 2);
        assert_eq!(player.air_time, 0);
        assert!((player.body.position.y - 49.0).abs() < 1e-3);
        assert_eq!(player.action, PlayerAction::Idle);
    }

    #[test]
    fn test_double_jump_then_exhausted() {
        let tuning = PhysicsTuning::default();
        let mut player = Player::new(Vec2::ZERO, Vec2::new(8.0, 15.0));
        player.jumps = 2;
        let empty: Vec<Rect> = Vec::new();

        assert!(player.jump(&tuning));
        player.update(&empty, Vec2::ZERO, &tuning);
        assert!(player.jump(&tuning));
        player.update(&empty, Vec2::ZERO, &tuning);
        assert!(!player.jump(&tuning));
        assert_eq!(player.jumps, 0);
    }

    #[test]
    fn test_wall_slide_and_wall_jump() {
        let tuning = PhysicsTuning::default();
        let map = ground_map();
        // Airborne just short of the wall at x = 96
        let mut player = Player::new(Vec2::new(88.5, 10.0), Vec2::new(8.0, 15.0));
        player.air_time = 10;
        player.body.velocity.y = 2.0;

        player.update(&map, Vec2::new(1.0, 0.0), &tuning);
        assert!(player.body.collisions.right);
        assert!(player.wall_slide);
        assert_eq!(player.body.position.x, 88.0);
        assert!(player.body.velocity.y <= 0.5);
        assert!(!player.body.flip);
        assert_eq!(player.action, PlayerAction::WallJump);

        let jumps = player.jumps;
        assert!(player.jump(&tuning));
        assert_eq!(player.body.velocity.x, -3.5);
        assert_eq!(player.body.velocity.y, -3.0);
        assert_eq!(player.air_time, 5);
        assert_eq!(player.jumps, jumps.saturating_sub(1));
    }

    #[test]
    fn test_wall_slide_and_wall_jump_left_wall() {
        let tuning = PhysicsTuning::default();
        let mut map = ground_map();
        // Wall on the left side, right edge at x = 0
        for y in 0..4 {
            map.place(Tile::new(TileKind::Stone, 1, (-1, y)));
        }
        let mut player = Player::new(Vec2::new(0.5, 10.0), Vec2::new(8.0, 15.0));
        player.air_time = 10;
        player.jumps = 2;
        player.body.velocity.y = 2.0;

        player.update(&map, Vec2::new(-1.0, 0.0), &tuning);
        assert!(player.body.collisions.left);
        assert!(!player.body.collisions.right);
        assert!(player.wall_slide);
        assert_eq!(player.body.position.x, 0.0);
        assert!(player.body.velocity.y <= 0.5);
        assert!(player.body.flip);
        assert_eq!(player.action, PlayerAction::WallJump);

        assert!(player.jump(&tuning));
        assert_eq!(player.body.velocity.x, 3.5);
        assert_eq!(player.body.velocity.y, -3.0);
        assert_eq!(player.air_time, 5);
        assert_eq!(player.jumps, 1);
    }

    #[test]
    fn test_wall_jump_requires_pushing_into_wall() {
        let tuning = PhysicsTuning::default();
        let map = ground_map();
        let mut player = Player::new(Vec2::new(88.5, 10.0), Vec2::new(8.0, 15.0));
        player.air_time = 10;
        player.jumps = 2;

        player.update(&map, Vec2::new(1.0, 0.0), &tuning);
        assert!(player.wall_slide);

        // Pretend the last intent was away from the wall
        player.body.last_movement = Vec2::new(-1.0, 0.0);
        let before = player;
        assert!(!player.jump(&tuning));
        assert_eq!(player, before);
    }

    #[test]
    fn test_no_wall_slide_right_after_takeoff() {
        let tuning = PhysicsTuning::default();
        let map = ground_map();
        let mut player = Player::new(Vec2::new(88.5, 10.0), Vec2::new(8.0, 15.0));
        player.air_time = 0;

        player.update(&map, Vec2::new(1.0, 0.0), &tuning);
        assert!(player.body.collisions.right);
        assert!(!player.wall_slide);
        assert_eq!(player.action, PlayerAction::Run);
    }

    #[test]
    fn test_air_time_saturates() {
        let tuning = PhysicsTuning::default();
        let empty: Vec<Rect> = Vec::new();
        let mut player = Player::new(Vec2::ZERO, Vec2::new(8.0, 15.0));
        player.air_time = u32::MAX;

        player.update(&empty, Vec2::ZERO, &tuning);
        assert_eq!(player.air_time, u32::MAX);
        assert_eq!(player.action, PlayerAction::Jump);
    }

    #[test]
    fn test_air_time_counts_up() {
        let tuning = PhysicsTuning::default();
        let empty: Vec<Rect> = Vec::new();
        let mut player = Player::new(Vec2::ZERO, Vec2::new(8.0, 15.0));
        for _ in 0..6 {
            player.update(&empty, Vec2::ZERO, &tuning);
        }
        assert_eq!(player.air_time, 6);
        assert_eq!(player.action, PlayerAction::Jump);
    }
}
