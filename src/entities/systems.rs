use super::animation::Animation;
use super::spawning::player_clip;
use super::{PhysicsTuning, Player, PlayerAction, TickInput};
use crate::world::{loader::to_screen, LevelManager};
use bevy::prelude::*;

/// Horizontal speed from held keys, in pixels per tick
const RUN_SPEED: f32 = 1.0;

/// Fraction of the gap to the player the camera closes each frame
const CAMERA_EASE: f32 = 1.0 / 30.0;

/// Reads the keyboard into the per-tick input
pub fn gather_player_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<TickInput>) {
    let left = keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]);
    let right = keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]);
    input.movement.x = (right as i32 - left as i32) as f32 * RUN_SPEED;

    if keyboard.any_just_pressed([KeyCode::Space, KeyCode::KeyW, KeyCode::ArrowUp]) {
        input.jump_requested = true;
    }
}

/// Runs one simulation tick for every player
pub fn step_players(
    level: Res<LevelManager>,
    tuning: Res<PhysicsTuning>,
    mut input: ResMut<TickInput>,
    mut query: Query<&mut Player>,
) {
    let jump = std::mem::take(&mut input.jump_requested);
    for mut player in &mut query {
        if jump {
            player.jump(&tuning);
        }
        player.update(&level.map, input.movement, &tuning);

        #[cfg(feature = "debug_collisions")]
        debug!(
            "Player at {:?} collisions {:?} air_time {}",
            player.body.position, player.body.collisions, player.air_time
        );
    }
}

/// Restarts the clip when the action changes, otherwise advances it
pub fn animate_players(mut query: Query<(&Player, &mut Animation, &mut LastAction)>) {
    for (player, mut animation, mut last) in &mut query {
        if last.0 != player.action {
            *animation = Animation::new(player_clip(player.action));
            last.0 = player.action;
        } else {
            animation.update();
        }
    }
}

/// Action the current animation was started for
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct LastAction(pub PlayerAction);

/// Syncs the player's simulated box with its Transform for rendering
pub fn sync_player_transform(
    mut query: Query<(&Player, &mut Transform, &mut Sprite), Changed<Player>>,
) {
    for (player, mut transform, mut sprite) in &mut query {
        let center = to_screen(player.body.center());
        transform.translation.x = center.x;
        transform.translation.y = center.y;
        sprite.flip_x = player.body.flip;
    }
}

/// Eases the camera toward the player
pub fn follow_player(
    player_query: Query<&Player>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let (Ok(player), Ok(mut camera)) = (player_query.single(), camera_query.single_mut()) else {
        return;
    };
    let target = to_screen(player.body.center());
    let current = camera.translation.truncate();
    let next = current + (target - current) * CAMERA_EASE;
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
