//! Asset naming and the browser image store
//!
//! The simulation and the scene builder only speak logical `SpriteKey`s;
//! this module maps them to image paths and, on wasm, owns the preloaded
//! `HtmlImageElement`s. An image that has not finished loading is simply
//! absent for that frame and its draw call is skipped.

use crate::scene::SpriteKey;

/// Every key the renderer may ask for, for preloading
pub const ALL_KEYS: [SpriteKey; 18] = [
    SpriteKey::Background,
    SpriteKey::Obstacle,
    SpriteKey::Ground,
    SpriteKey::Actor(0),
    SpriteKey::Actor(1),
    SpriteKey::Actor(2),
    SpriteKey::Digit(0),
    SpriteKey::Digit(1),
    SpriteKey::Digit(2),
    SpriteKey::Digit(3),
    SpriteKey::Digit(4),
    SpriteKey::Digit(5),
    SpriteKey::Digit(6),
    SpriteKey::Digit(7),
    SpriteKey::Digit(8),
    SpriteKey::Digit(9),
    SpriteKey::IdlePrompt,
    SpriteKey::OverBanner,
];

const DIGIT_PATHS: [&str; 10] = [
    "assets/digits/0.png",
    "assets/digits/1.png",
    "assets/digits/2.png",
    "assets/digits/3.png",
    "assets/digits/4.png",
    "assets/digits/5.png",
    "assets/digits/6.png",
    "assets/digits/7.png",
    "assets/digits/8.png",
    "assets/digits/9.png",
];

/// Image path for a logical sprite name
pub fn asset_path(key: SpriteKey) -> &'static str {
    match key {
        SpriteKey::Background => "assets/background-day.png",
        SpriteKey::Obstacle => "assets/pipe-green.png",
        SpriteKey::Ground => "assets/base.png",
        SpriteKey::Actor(0) => "assets/bird-downflap.png",
        SpriteKey::Actor(1) => "assets/bird-midflap.png",
        SpriteKey::Actor(_) => "assets/bird-upflap.png",
        SpriteKey::Digit(d) => DIGIT_PATHS[(d as usize).min(9)],
        SpriteKey::IdlePrompt => "assets/message.png",
        SpriteKey::OverBanner => "assets/gameover.png",
    }
}

/// Preloaded image store (wasm only)
#[cfg(target_arch = "wasm32")]
pub struct ImageStore {
    images: std::collections::HashMap<SpriteKey, web_sys::HtmlImageElement>,
}

#[cfg(target_arch = "wasm32")]
impl ImageStore {
    /// Create the store and kick off loading for every known sprite.
    /// Loading is left to the browser; completeness is checked per draw.
    pub fn preload() -> Self {
        let mut images = std::collections::HashMap::new();
        for key in ALL_KEYS {
            match web_sys::HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(asset_path(key));
                    images.insert(key, img);
                }
                Err(e) => log::warn!("image element for {:?} failed: {:?}", key, e),
            }
        }
        Self { images }
    }

    /// The image for a key, or `None` while it is still loading
    pub fn get(&self, key: SpriteKey) -> Option<&web_sys::HtmlImageElement> {
        self.images.get(&key).filter(|img| img.complete())
    }
}
