//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-unit timestep only (1.0 = one 60 Hz tick)
//! - Seeded RNG only
//! - Stable obstacle order (spawn order = left-to-right screen order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, actor_box, lower_rect, upper_rect};
pub use state::{Geometry, Mode, Obstacle, RngState, SimState, Viewport};
pub use tick::{Cue, activate, advance};
