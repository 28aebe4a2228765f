//! Frame description builder
//!
//! Turns a `SimState` into an ordered list of sprite draws. This is the
//! whole rendering contract: the builder reads the state and never writes
//! it, and the wasm renderer just replays the list. Keys are logical names
//! resolved to images by the asset store.

use glam::Vec2;

use crate::consts::*;
use crate::sim::{Mode, SimState};

/// Logical sprite names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKey {
    Background,
    Obstacle,
    Ground,
    /// Flap animation frame, 0..=2
    Actor(u8),
    /// Score glyph, 0..=9
    Digit(u8),
    /// "tap to start" message
    IdlePrompt,
    /// "game over" banner
    OverBanner,
}

/// One sprite draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub key: SpriteKey,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Rotation about the sprite center, degrees clockwise
    pub rotation_deg: f32,
    /// Mirror vertically (upper obstacle sprite)
    pub flip_y: bool,
}

impl Sprite {
    fn new(key: SpriteKey, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            key,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
            rotation_deg: 0.0,
            flip_y: false,
        }
    }
}

/// Pixel size of the idle prompt image
const IDLE_PROMPT_SIZE: Vec2 = Vec2::new(184.0, 267.0);
/// Pixel size of the game-over banner image
const OVER_BANNER_SIZE: Vec2 = Vec2::new(192.0, 42.0);

/// Build the draw list for one frame, back to front
pub fn build_frame(state: &SimState) -> Vec<Sprite> {
    let v = state.viewport;
    let g = &state.geometry;
    let mut sprites = Vec::new();

    sprites.push(Sprite::new(SpriteKey::Background, 0.0, 0.0, v.w, v.h));

    for obstacle in &state.obstacles {
        let mut upper = Sprite::new(
            SpriteKey::Obstacle,
            obstacle.x,
            0.0,
            g.obstacle_w,
            obstacle.gap_top,
        );
        upper.flip_y = true;
        sprites.push(upper);

        let lower_top = obstacle.gap_top + g.gap_h;
        sprites.push(Sprite::new(
            SpriteKey::Obstacle,
            obstacle.x,
            lower_top,
            g.obstacle_w,
            v.h - lower_top,
        ));
    }

    // Two viewport-wide strips so the scroll wraps seamlessly
    let ground_y = v.h - g.ground_h;
    let offset = state.ground_scroll.rem_euclid(v.w) - v.w;
    sprites.push(Sprite::new(SpriteKey::Ground, offset, ground_y, v.w, g.ground_h));
    sprites.push(Sprite::new(
        SpriteKey::Ground,
        offset + v.w,
        ground_y,
        v.w,
        g.ground_h,
    ));

    let frame = ((state.time_frames / ACTOR_ANIM_PERIOD) as u32 % 3) as u8;
    let mut actor = Sprite::new(
        SpriteKey::Actor(frame),
        g.actor_center_x - g.actor_w / 2.0,
        state.actor_y,
        g.actor_w,
        g.actor_h,
    );
    actor.rotation_deg = state.rotation;
    sprites.push(actor);

    push_score_digits(&mut sprites, state);

    match state.mode {
        Mode::Idle => sprites.push(Sprite::new(
            SpriteKey::IdlePrompt,
            (v.w - IDLE_PROMPT_SIZE.x) / 2.0,
            (v.h - IDLE_PROMPT_SIZE.y) / 2.0,
            IDLE_PROMPT_SIZE.x,
            IDLE_PROMPT_SIZE.y,
        )),
        Mode::Over => sprites.push(Sprite::new(
            SpriteKey::OverBanner,
            (v.w - OVER_BANNER_SIZE.x) / 2.0,
            (v.h - OVER_BANNER_SIZE.y) / 2.0,
            OVER_BANNER_SIZE.x,
            OVER_BANNER_SIZE.y,
        )),
        Mode::Running => {}
    }

    sprites
}

/// Centered digit-by-digit score display
fn push_score_digits(sprites: &mut Vec<Sprite>, state: &SimState) {
    let digits: Vec<u8> = state
        .score
        .to_string()
        .bytes()
        .map(|b| b - b'0')
        .collect();
    let total_w = digits.len() as f32 * DIGIT_SIZE;
    let x0 = (state.viewport.w - total_w) / 2.0;
    let y = state.viewport.h * SCORE_Y_FRAC;

    for (i, digit) in digits.iter().enumerate() {
        sprites.push(Sprite::new(
            SpriteKey::Digit(*digit),
            x0 + i as f32 * DIGIT_SIZE,
            y,
            DIGIT_SIZE,
            DIGIT_SIZE,
        ));
    }
}
