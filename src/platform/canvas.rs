//! Canvas 2D painter

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use crate::render::{Align, Painter};

pub struct CanvasPainter<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> CanvasPainter<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            f64::from(center.x),
            f64::from(center.y),
            f64::from(radius.max(0.0)),
            0.0,
            TAU,
        );
    }
}

impl Painter for CanvasPainter<'_> {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            f64::from(origin.x),
            f64::from(origin.y),
            f64::from(size.x),
            f64::from(size.y),
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(f64::from(width));
        self.ctx.begin_path();
        self.ctx.move_to(f64::from(from.x), f64::from(from.y));
        self.ctx.line_to(f64::from(to.x), f64::from(to.y));
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, glow: f32) {
        if glow > 0.0 {
            self.ctx.set_shadow_color(color);
            self.ctx.set_shadow_blur(f64::from(glow));
        }
        self.ctx.set_fill_style_str(color);
        self.circle_path(center, radius);
        self.ctx.fill();
        self.ctx.set_shadow_blur(0.0);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(f64::from(width));
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str, align: Align) {
        self.ctx.set_font(font);
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align(match align {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        });
        // Centered labels sit on their anchor, HUD labels on the baseline
        self.ctx.set_text_baseline(if align == Align::Center {
            "middle"
        } else {
            "alphabetic"
        });
        let _ = self
            .ctx
            .fill_text(text, f64::from(pos.x), f64::from(pos.y));
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(f64::from(alpha.clamp(0.0, 1.0)));
    }
}
