use super::manager::{LevelManager, TileEdit};
use crate::tiles::{TileKind, TileMap};
use bevy::prelude::*;

/// Marker component for the quad drawn for one tile
#[derive(Component, Debug, Clone, Copy)]
pub struct TileSprite;

/// Level revision the tile sprites were last built from
#[derive(Resource, Debug, Default)]
pub struct TileSpriteRevision(pub Option<u64>);

/// Simulation space is y-down, bevy world space is y-up
pub fn to_screen(pos: Vec2) -> Vec2 {
    Vec2::new(pos.x, -pos.y)
}

fn kind_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::srgb(0.32, 0.62, 0.25),
        TileKind::Stone => Color::srgb(0.45, 0.45, 0.5),
        TileKind::Decor => Color::srgb(0.8, 0.55, 0.3),
        TileKind::LargeDecor => Color::srgb(0.55, 0.35, 0.2),
        TileKind::Spawners => Color::srgba(1.0, 0.2, 0.8, 0.5),
    }
}

/// Load the level file, or the demo level when none exists
pub fn setup_level(mut level: ResMut<LevelManager>) {
    if let Err(e) = level.load() {
        warn!("Starting with an empty level: {}", e);
    }
    info!("Level ready: {}", level.stats());
}

/// Apply queued editor changes at the tick boundary
pub fn apply_level_edits(mut level: ResMut<LevelManager>) {
    level.apply_pending();
}

/// Editor shortcuts: T autotiles, O saves, L reloads
pub fn editor_shortcuts(keyboard: Res<ButtonInput<KeyCode>>, mut level: ResMut<LevelManager>) {
    if keyboard.just_pressed(KeyCode::KeyT) {
        level.queue_edit(TileEdit::Autotile);
    }
    if keyboard.just_pressed(KeyCode::KeyO) {
        if let Err(e) = level.save() {
            warn!("Failed to save level: {}", e);
        }
    }
    if keyboard.just_pressed(KeyCode::KeyL) {
        // Failure is logged by the manager; the current map stays
        let _ = level.load();
    }
}

/// Rebuild tile quads whenever the level changed
pub fn sync_tile_sprites(
    mut commands: Commands,
    level: Res<LevelManager>,
    mut built: ResMut<TileSpriteRevision>,
    sprites: Query<Entity, With<TileSprite>>,
) {
    if built.0 == Some(level.revision) {
        return;
    }

    for entity in sprites.iter() {
        commands.entity(entity).despawn();
    }
    spawn_tile_sprites(&mut commands, &level.map);
    built.0 = Some(level.revision);
}

fn spawn_tile_sprites(commands: &mut Commands, map: &TileMap) {
    let size = map.tile_size() as f32;

    for tile in map.offgrid() {
        let center = to_screen(tile.pos + Vec2::splat(size / 2.0));
        commands.spawn((
            TileSprite,
            Sprite::from_color(kind_color(tile.kind), Vec2::splat(size)),
            Transform::from_xyz(center.x, center.y, -0.1),
        ));
    }

    for tile in map.iter() {
        let rect = map.cell_rect(tile.pos);
        let center = to_screen(rect.center());
        commands.spawn((
            TileSprite,
            Sprite::from_color(kind_color(tile.kind), rect.size()),
            Transform::from_xyz(center.x, center.y, 0.0),
        ));
    }
}
