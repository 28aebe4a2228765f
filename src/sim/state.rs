//! Game state and core simulation types
//!
//! One mutable record owned by the engine, fully replaced on restart.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Waiting for the first input
    Idle,
    /// Simulation advancing
    Running,
    /// Terminal until an explicit restart
    Over,
}

/// Viewport dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub w: f32,
    pub h: f32,
}

impl Viewport {
    /// Dimensions are clamped to a minimum of 1 pixel
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            w: w.max(1.0),
            h: h.max(1.0),
        }
    }
}

/// Pixel dimensions derived from the viewport
///
/// Recomputed on resize without touching the rest of the state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Actor bounding-box width
    pub actor_w: f32,
    /// Actor bounding-box height
    pub actor_h: f32,
    /// Obstacle column width
    pub obstacle_w: f32,
    /// Vertical gap between the upper and lower rectangles
    pub gap_h: f32,
    /// Ground band height
    pub ground_h: f32,
    /// Actor's fixed horizontal center
    pub actor_center_x: f32,
}

impl Geometry {
    pub fn from_viewport(viewport: Viewport) -> Self {
        let actor_w = viewport.w * ACTOR_WIDTH_FRAC;
        Self {
            actor_w,
            actor_h: actor_w * ACTOR_ASPECT,
            obstacle_w: viewport.w * OBSTACLE_WIDTH_FRAC,
            gap_h: viewport.h * GAP_FRAC,
            ground_h: viewport.h * GROUND_FRAC,
            actor_center_x: viewport.w * ACTOR_CENTER_FRAC,
        }
    }
}

/// One obstacle pair: an upper and lower rectangle with a gap between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Height of the upper rectangle (top of the gap)
    pub gap_top: f32,
}

impl Obstacle {
    #[inline]
    pub fn right_edge(&self, obstacle_w: f32) -> f32 {
        self.x + obstacle_w
    }
}

/// RNG seed record kept alongside the live generator for snapshots
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

fn skipped_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Current phase
    pub mode: Mode,
    /// Actor's vertical offset (top of its bounding box)
    pub actor_y: f32,
    /// Actor's vertical speed, clamped to +/- MAX_VELOCITY
    pub actor_vel: f32,
    /// Obstacles in spawn order, leftmost first
    pub obstacles: Vec<Obstacle>,
    /// Obstacles passed so far
    pub score: u32,
    /// Smoothed render rotation in degrees (cosmetic, never collides)
    pub rotation: f32,
    /// Frame units elapsed while running (drives the flap animation)
    pub time_frames: f32,
    /// Ground band scroll offset (cosmetic)
    pub ground_scroll: f32,
    /// Host viewport
    pub viewport: Viewport,
    /// Dimensions derived from the viewport
    pub geometry: Geometry,
    /// Seed record for reproducibility
    pub rng_state: RngState,
    /// Live generator for gap placement
    #[serde(skip, default = "skipped_rng")]
    pub rng: Pcg32,
}

impl SimState {
    /// Create a fresh state waiting for the first input
    pub fn new(viewport: Viewport, seed: u64) -> Self {
        Self {
            mode: Mode::Idle,
            actor_y: viewport.h * ACTOR_START_FRAC,
            actor_vel: 0.0,
            obstacles: Vec::new(),
            score: 0,
            rotation: 0.0,
            time_frames: 0.0,
            ground_scroll: 0.0,
            viewport,
            geometry: Geometry::from_viewport(viewport),
            rng_state: RngState::new(seed),
            rng: RngState::new(seed).to_rng(),
        }
    }

    /// Recompute derived dimensions after a host resize.
    /// The simulation itself is untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.geometry = Geometry::from_viewport(viewport);
    }

    /// Replace everything but the RNG stream with a fresh running state
    pub(crate) fn restart_running(&mut self) {
        let rng = std::mem::replace(&mut self.rng, skipped_rng());
        let mut fresh = Self::new(self.viewport, self.rng_state.seed);
        fresh.mode = Mode::Running;
        fresh.rng = rng;
        *self = fresh;
    }

    /// Inclusive bounds for a freshly rolled gap top
    pub(crate) fn gap_top_range(&self) -> (f32, f32) {
        let g = &self.geometry;
        let max = (self.viewport.h - g.gap_h - g.ground_h - GAP_MARGIN).max(GAP_MARGIN);
        (GAP_MARGIN, max)
    }
}
