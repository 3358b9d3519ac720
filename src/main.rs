use bevy::prelude::*;

use skyhop::entities::{self, constants::*, PhysicsTuning, TickInput};
use skyhop::world::{loader, LevelManager};

/// Orthographic scale; pixel art is drawn at 2x
const CAMERA_SCALE: f32 = 0.5;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(ImagePlugin::default_nearest()))
        .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
        .init_resource::<LevelManager>()
        .init_resource::<PhysicsTuning>()
        .init_resource::<TickInput>()
        .init_resource::<loader::TileSpriteRevision>()
        .add_systems(Startup, (setup_scene, loader::setup_level))
        .add_systems(
            FixedUpdate,
            (
                loader::apply_level_edits,
                entities::step_players.after(loader::apply_level_edits),
                entities::animate_players.after(entities::step_players),
            ),
        )
        .add_systems(
            Update,
            (
                entities::gather_player_input,
                loader::editor_shortcuts,
                loader::sync_tile_sprites,
                entities::sync_player_transform,
                entities::follow_player.after(entities::sync_player_transform),
            ),
        )
        .run();
}

fn setup_scene(mut commands: Commands) {
    let spawn = Vec2::from(PLAYER_SPAWN);
    let start = loader::to_screen(spawn);

    // Camera starts on the player and eases after it from there
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: CAMERA_SCALE,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(start.x, start.y, 999.0),
    ));

    entities::spawn_player(&mut commands, spawn, Vec2::from(PLAYER_SIZE));

    info!("Scene setup complete");
}
