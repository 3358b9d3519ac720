use super::animation::{Animation, AnimationClip};
use super::systems::LastAction;
use super::{Player, PlayerAction};
use bevy::prelude::*;

/// Clip shown for each player action
pub fn player_clip(action: PlayerAction) -> AnimationClip {
    match action {
        PlayerAction::Idle => AnimationClip::new(4, 6, true),
        PlayerAction::Run => AnimationClip::new(8, 4, true),
        PlayerAction::Jump => AnimationClip::new(1, 5, false),
        PlayerAction::WallJump => AnimationClip::new(1, 5, true),
    }
}

/// Spawns the player with its hitbox drawn as a plain quad
pub fn spawn_player(commands: &mut Commands, position: Vec2, size: Vec2) -> Entity {
    let player = Player::new(position, size);
    commands
        .spawn((
            player,
            Animation::new(player_clip(player.action)),
            LastAction(player.action),
            Sprite::from_color(Color::srgb(0.9, 0.85, 0.6), size),
            Transform::default(),
        ))
        .id()
}
