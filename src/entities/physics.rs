use super::types::{CollisionFlags, PhysicsBody, PhysicsTuning};
use crate::tiles::TileMap;
use bevy::math::{Rect, Vec2};

/// Source of solid rectangles near a position
pub trait SolidLookup {
    fn solid_rects_around(&self, pos: Vec2) -> Vec<Rect>;
}

impl SolidLookup for TileMap {
    fn solid_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        self.physics_rects_around(pos)
    }
}

/// A fixed set of rectangles, all considered near every position
impl SolidLookup for [Rect] {
    fn solid_rects_around(&self, _pos: Vec2) -> Vec<Rect> {
        self.to_vec()
    }
}

impl SolidLookup for Vec<Rect> {
    fn solid_rects_around(&self, pos: Vec2) -> Vec<Rect> {
        self.as_slice().solid_rects_around(pos)
    }
}

fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

fn with_left(rect: Rect, x: f32) -> Rect {
    Rect::from_corners(Vec2::new(x, rect.min.y), Vec2::new(x + rect.width(), rect.max.y))
}

fn with_top(rect: Rect, y: f32) -> Rect {
    Rect::from_corners(Vec2::new(rect.min.x, y), Vec2::new(rect.max.x, y + rect.height()))
}

/// Move `rect` by `movement`, x first then y, pushing it out of solids
///
/// Each axis queries solids at the rectangle's position after that axis moved.
/// Resolving horizontally before vertically is only an approximation for
/// diagonal contacts; level geometry relies on this order.
pub fn resolve_axis_separated<L: SolidLookup + ?Sized>(
    rect: Rect,
    solids: &L,
    movement: Vec2,
) -> (Rect, CollisionFlags) {
    let mut collisions = CollisionFlags::default();

    let mut rect = with_left(rect, rect.min.x + movement.x);
    for solid in solids.solid_rects_around(rect.min) {
        if !overlaps(&rect, &solid) {
            continue;
        }
        if movement.x > 0.0 {
            rect = with_left(rect, solid.min.x - rect.width());
            collisions.right = true;
        }
        if movement.x < 0.0 {
            rect = with_left(rect, solid.max.x);
            collisions.left = true;
        }
    }

    let mut rect = with_top(rect, rect.min.y + movement.y);
    for solid in solids.solid_rects_around(rect.min) {
        if !overlaps(&rect, &solid) {
            continue;
        }
        if movement.y > 0.0 {
            rect = with_top(rect, solid.min.y - rect.height());
            collisions.down = true;
        }
        if movement.y < 0.0 {
            rect = with_top(rect, solid.max.y);
            collisions.up = true;
        }
    }

    (rect, collisions)
}

/// Advance a body by one tick
pub fn update_body<L: SolidLookup + ?Sized>(
    body: &mut PhysicsBody,
    solids: &L,
    movement: Vec2,
    tuning: &PhysicsTuning,
) {
    body.collisions = CollisionFlags::default();

    let frame_movement = movement + body.velocity;
    let (rect, collisions) = resolve_axis_separated(body.rect(), solids, frame_movement);
    body.position = rect.min;
    body.collisions = collisions;

    if movement.x > 0.0 {
        body.flip = false;
    }
    if movement.x < 0.0 {
        body.flip = true;
    }

    body.last_movement = movement;

    body.velocity.y = (body.velocity.y + tuning.gravity).min(tuning.terminal_velocity);
    if body.collisions.vertical() {
        body.velocity.y = 0.0;
    }

    body.velocity.x = if body.velocity.x > 0.0 {
        (body.velocity.x - tuning.friction).max(0.0)
    } else {
        (body.velocity.x + tuning.friction).min(0.0)
    };
}
