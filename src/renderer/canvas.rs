//! 2D canvas backend (browser only)

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::DrawCommand;
use crate::colors;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    pub size: (u32, u32),
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);

        Ok(Self {
            ctx,
            size: (canvas.width(), canvas.height()),
        })
    }

    /// Replay a frame's commands in order
    pub fn render(&self, commands: &[DrawCommand]) {
        let ctx = &self.ctx;
        let (w, h) = (self.size.0 as f64, self.size.1 as f64);

        for command in commands {
            match command {
                DrawCommand::Clear { color } => {
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(&colors::to_css(*color));
                    ctx.fill_rect(0.0, 0.0, w, h);
                }
                DrawCommand::Rect { pos, size, color } => {
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(&colors::to_css(*color));
                    ctx.fill_rect(pos.x as f64, pos.y as f64, size.x as f64, size.y as f64);
                }
                DrawCommand::Circle {
                    center,
                    radius,
                    color,
                    alpha,
                } => {
                    ctx.set_global_alpha(*alpha as f64);
                    ctx.set_fill_style_str(&colors::to_css(*color));
                    ctx.begin_path();
                    if ctx
                        .arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)
                        .is_ok()
                    {
                        ctx.fill();
                    }
                }
                DrawCommand::Polygon { points, color } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    ctx.set_global_alpha(1.0);
                    ctx.set_fill_style_str(&colors::to_css(*color));
                    ctx.begin_path();
                    ctx.move_to(first.x as f64, first.y as f64);
                    for p in rest {
                        ctx.line_to(p.x as f64, p.y as f64);
                    }
                    ctx.close_path();
                    ctx.fill();
                }
            }
        }

        ctx.set_global_alpha(1.0);
    }
}
