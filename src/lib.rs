//! Gapwing - a flap-through-the-gap arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring)
//! - `scene`: Pure draw-list builder consumed by the renderer
//! - `assets`: Logical sprite names and the browser image store
//! - `audio`: WebAudio cue playback (wasm only)
//! - `render`: Canvas2D renderer (wasm only)
//! - `settings`: Audio/accessibility preferences

pub mod assets;
pub mod scene;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod render;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target simulation rate (ticks per second)
    pub const TARGET_FPS: f32 = 60.0;
    /// Target frame interval in milliseconds
    pub const FRAME_TIME_MS: f64 = 1000.0 / TARGET_FPS as f64;
    /// One frame unit expressed in milliseconds (dt = elapsed_ms / this)
    pub const FRAME_UNIT_MS: f32 = 16.67;
    /// Largest dt (in frame units) the host feeds a single `advance` call.
    /// Caps the scoring window after a long stall (tab switch, GC pause).
    pub const MAX_FRAME_UNITS: f32 = 3.0;

    /// Downward acceleration per frame unit
    pub const GRAVITY: f32 = 0.4;
    /// Upward velocity set on a flap
    pub const FLAP_IMPULSE: f32 = -7.0;
    /// Velocity bound, both directions
    pub const MAX_VELOCITY: f32 = 10.0;
    /// Obstacle scroll speed at score 0 (pixels per frame unit)
    pub const BASE_SPEED: f32 = 4.0;
    /// Scroll speed gained per point scored
    pub const SPEED_PER_POINT: f32 = 0.1;

    /// Actor width as a fraction of viewport width
    pub const ACTOR_WIDTH_FRAC: f32 = 0.05;
    /// Actor height relative to actor width
    pub const ACTOR_ASPECT: f32 = 0.7;
    /// Actor's fixed horizontal center as a fraction of viewport width
    pub const ACTOR_CENTER_FRAC: f32 = 0.15;
    /// Obstacle width as a fraction of viewport width
    pub const OBSTACLE_WIDTH_FRAC: f32 = 0.08;
    /// Gap height as a fraction of viewport height
    pub const GAP_FRAC: f32 = 0.35;
    /// Ground band height as a fraction of viewport height
    pub const GROUND_FRAC: f32 = 0.12;
    /// A new obstacle spawns once the trailing one is left of this fraction
    /// of the viewport width
    pub const SPAWN_THRESHOLD_FRAC: f32 = 0.6;
    /// Minimum distance from the gap to the top edge and to the ground
    pub const GAP_MARGIN: f32 = 50.0;

    /// Render rotation target while rising (degrees)
    pub const ROTATION_UP_DEG: f32 = 45.0;
    /// Render rotation target while falling (degrees)
    pub const ROTATION_DOWN_DEG: f32 = -30.0;
    /// Exponential smoothing factor for the render rotation
    pub const ROTATION_SMOOTHING: f32 = 0.1;
    /// Actor starts at this fraction of the viewport height
    pub const ACTOR_START_FRAC: f32 = 0.45;

    /// Score digit size in pixels
    pub const DIGIT_SIZE: f32 = 40.0;
    /// Score baseline as a fraction of viewport height
    pub const SCORE_Y_FRAC: f32 = 0.1;
    /// Flap animation advances one sprite frame every this many ticks
    pub const ACTOR_ANIM_PERIOD: f32 = 5.0;
}

/// Linear interpolation from `start` toward `end` by `amount`
#[inline]
pub fn lerp(start: f32, end: f32, amount: f32) -> f32 {
    start + (end - start) * amount
}
