//! HTML canvas surface (WASM only)

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface};
use crate::error::{ParkourError, Result};

/// Player sprite, embedded so there is nothing to fetch
pub const PLAYER_SPRITE_URL: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCAyMDAgMjAwIj48c3R5bGU+LnN0MHtmaWxsOiMwMEY4RkY7fS5zdDF7ZmlsbDojRkYwMEFBO30uc3Qye2ZpbGw6IzAwRkY4ODt9PC9zdHlsZT48cmVjdCB4PSI0MCIgeT0iNDAiIHdpZHRoPSIxMjAiIGhlaWdodD0iMTIwIiBjbGFzcz0ic3QwIiByeD0iMjAiLz48Y2lyY2xlIGN4PSIxMDAiIGN5PSI3MCIgcj0iMjAiIGNsYXNzPSJzdDEiLz48cmVjdCB4PSI2MCIgeT0iMTAwIiB3aWR0aD0iODAiIGhlaWdodD0iNDAiIGNsYXNzPSJzdDIiIHJ4PSIxMCIvPjwvc3ZnPg==";

/// A canvas 2D context plus the player sprite image
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
}

impl CanvasSurface {
    /// Grab the 2D context of `canvas` and start loading the sprite
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| ParkourError::Js(format!("{e:?}")))?
            .ok_or(ParkourError::MissingContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ParkourError::MissingContext)?;

        let sprite = HtmlImageElement::new().map_err(|e| ParkourError::Js(format!("{e:?}")))?;
        sprite.set_src(PLAYER_SPRITE_URL);

        Ok(Self { ctx, sprite })
    }
}

impl Surface for CanvasSurface {
    fn set_fill(&mut self, color: Color) {
        self.ctx.set_fill_style_str(&color.to_css());
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.ctx
            .fill_rect(x as f64, y as f64, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = self.ctx.translate(x as f64, y as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = self.ctx.scale(x as f64, y as f64);
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn sprite_ready(&self) -> bool {
        self.sprite.complete() && self.sprite.natural_width() > 0
    }

    fn draw_sprite(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Err(e) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &self.sprite,
            x as f64,
            y as f64,
            width as f64,
            height as f64,
        ) {
            log::warn!("Sprite draw failed: {:?}", e);
        }
    }
}
