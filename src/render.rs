//! Canvas2D renderer (wasm only)
//!
//! Replays a scene draw list against the canvas. Strictly read-only with
//! respect to the simulation; a sprite whose image has not loaded yet is
//! skipped for the frame.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::assets::ImageStore;
use crate::scene::Sprite;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Grab the 2d context from the canvas
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }

    /// Draw one frame, back to front
    pub fn draw(&self, sprites: &[Sprite], store: &ImageStore, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);

        for sprite in sprites {
            let Some(image) = store.get(sprite.key) else {
                continue;
            };

            let (w, h) = (sprite.size.x as f64, sprite.size.y as f64);

            if sprite.rotation_deg == 0.0 && !sprite.flip_y {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    image,
                    sprite.pos.x as f64,
                    sprite.pos.y as f64,
                    w,
                    h,
                );
                continue;
            }

            // Rotate/mirror about the sprite center
            self.ctx.save();
            let cx = sprite.pos.x as f64 + w / 2.0;
            let cy = sprite.pos.y as f64 + h / 2.0;
            let _ = self.ctx.translate(cx, cy);
            if sprite.flip_y {
                let _ = self.ctx.scale(1.0, -1.0);
            }
            if sprite.rotation_deg != 0.0 {
                let _ = self.ctx.rotate((sprite.rotation_deg as f64).to_radians());
            }
            let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                image,
                -w / 2.0,
                -h / 2.0,
                w,
                h,
            );
            self.ctx.restore();
        }
    }
}
