//! Axis-aligned collision tests
//!
//! An obstacle is two rectangles with a gap between them; the actor is a
//! single box at a fixed horizontal center. Overlap must be strict on both
//! axes, so boxes that merely touch do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Geometry, Obstacle};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.pos.x < other.right()
            && other.pos.x < self.right()
            && self.pos.y < other.bottom()
            && other.pos.y < self.bottom()
    }
}

/// The actor's bounding box at its fixed horizontal center
pub fn actor_box(geometry: &Geometry, actor_y: f32) -> Aabb {
    Aabb::new(
        geometry.actor_center_x - geometry.actor_w / 2.0,
        actor_y,
        geometry.actor_w,
        geometry.actor_h,
    )
}

/// The rectangle above an obstacle's gap
pub fn upper_rect(obstacle: &Obstacle, geometry: &Geometry) -> Aabb {
    Aabb::new(obstacle.x, 0.0, geometry.obstacle_w, obstacle.gap_top)
}

/// The rectangle below an obstacle's gap, extending to the bottom edge
pub fn lower_rect(obstacle: &Obstacle, geometry: &Geometry, viewport_h: f32) -> Aabb {
    let top = obstacle.gap_top + geometry.gap_h;
    Aabb::new(obstacle.x, top, geometry.obstacle_w, viewport_h - top)
}

/// Whether the actor box overlaps either rectangle of the obstacle pair
pub fn hits_obstacle(
    actor: &Aabb,
    obstacle: &Obstacle,
    geometry: &Geometry,
    viewport_h: f32,
) -> bool {
    actor.intersects(&upper_rect(obstacle, geometry))
        || actor.intersects(&lower_rect(obstacle, geometry, viewport_h))
}

/// Whether the actor has dropped into the ground band
#[inline]
pub fn hits_ground(actor_y: f32, geometry: &Geometry, viewport_h: f32) -> bool {
    actor_y > viewport_h - geometry.ground_h - geometry.actor_h
}
