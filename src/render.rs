//! Frame drawing
//!
//! Everything goes through `Painter`, a thin slice of the Canvas 2D API, so the
//! scene can be checked on the host. Drawing never touches gameplay state.

use glam::Vec2;

use crate::consts::GRID_SPACING;
use crate::sim::{GameState, MarkerKind, ShotMarker, Target};

const BACKGROUND: &str = "#1a2639";
const GRID: &str = "#2a3a4a33";
const HIT_RING: &str = "#4afcff";
const MISS_CROSS: &str = "#ff5555";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Minimal immediate-mode drawing surface
pub trait Painter {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: &str);
    fn line(&mut self, from: Vec2, to: Vec2, color: &str, width: f32);
    /// Filled disc; `glow` is a shadow blur radius (0 for none)
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, glow: f32);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, width: f32);
    fn text(&mut self, text: &str, pos: Vec2, font: &str, color: &str, align: Align);
    /// Opacity for subsequent operations
    fn set_alpha(&mut self, alpha: f32);
}

/// Draw one complete frame
pub fn draw_frame<P: Painter>(state: &GameState, muted: bool, painter: &mut P) {
    let size = state.bounds.size();

    painter.set_alpha(1.0);
    painter.fill_rect(Vec2::ZERO, size, BACKGROUND);
    draw_grid(size, painter);

    for target in &state.targets {
        draw_target(target, painter);
    }

    for marker in &state.markers {
        draw_marker(marker, painter);
    }
    painter.set_alpha(1.0);

    draw_crosshair(state.cursor, painter);

    painter.text(
        &format!("WAVE {}", state.wave),
        Vec2::new(size.x - 30.0, 70.0),
        "bold 48px Arial",
        "#ffffff33",
        Align::Right,
    );

    if muted {
        painter.text(
            "🔇 MUTED",
            Vec2::new(10.0, size.y - 20.0),
            "bold 14px Arial",
            "#ff555533",
            Align::Left,
        );
    }
}

fn draw_grid<P: Painter>(size: Vec2, painter: &mut P) {
    let mut x = 0.0;
    while x < size.x {
        painter.line(Vec2::new(x, 0.0), Vec2::new(x, size.y), GRID, 1.0);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < size.y {
        painter.line(Vec2::new(0.0, y), Vec2::new(size.x, y), GRID, 1.0);
        y += GRID_SPACING;
    }
}

/// CSS color for a target hue
pub fn target_color(target: &Target) -> String {
    format!("hsl({:.0}, 70%, 60%)", target.hue)
}

fn draw_target<P: Painter>(target: &Target, painter: &mut P) {
    let color = target_color(target);
    painter.fill_circle(target.pos, target.radius, &color, 15.0);
    painter.fill_circle(target.pos, target.radius * 0.4, "white", 0.0);
    painter.text(
        &target.points.to_string(),
        target.pos,
        "bold 14px Arial",
        "black",
        Align::Center,
    );
}

fn draw_marker<P: Painter>(marker: &ShotMarker, painter: &mut P) {
    painter.set_alpha(marker.alpha());
    let p = marker.pos;
    match marker.kind {
        MarkerKind::Hit => painter.stroke_circle(p, 30.0, HIT_RING, 3.0),
        MarkerKind::Miss => {
            let d = 15.0;
            painter.line(p + Vec2::new(-d, -d), p + Vec2::new(d, d), MISS_CROSS, 3.0);
            painter.line(p + Vec2::new(d, -d), p + Vec2::new(-d, d), MISS_CROSS, 3.0);
        }
    }
}

fn draw_crosshair<P: Painter>(at: Vec2, painter: &mut P) {
    painter.stroke_circle(at, 15.0, "white", 2.0);
    // Four ticks from 10 to 25 units out
    for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
        painter.line(at + dir * 10.0, at + dir * 25.0, "white", 2.0);
    }
}
