//! Wave generation
//!
//! Lays out a fresh batch of targets with a minimum spacing between centers.

use glam::Vec2;
use rand::Rng;

use super::target::{Bounds, Target};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;
use crate::settings::Rules;

/// Replace `targets` with `count` freshly placed targets.
///
/// Candidates are sampled uniformly in the canvas shrunk by the spawn margin
/// and resampled while closer than `min_separation` to an accepted center.
/// After `MAX_PLACEMENT_ATTEMPTS` rejections the last candidate is kept.
pub fn spawn_wave<R: Rng>(
    targets: &mut Vec<Target>,
    bounds: Bounds,
    count: usize,
    rules: &Rules,
    rng: &mut R,
    mut next_id: impl FnMut() -> u32,
) {
    targets.clear();
    targets.reserve(count);

    for _ in 0..count {
        let mut candidate = sample_position(bounds, rules.spawn_margin, rng);
        let mut attempts = 1;
        while overlaps(targets, candidate, rules.min_separation) {
            if attempts >= MAX_PLACEMENT_ATTEMPTS {
                log::warn!(
                    "No free spot after {} attempts on {}x{} canvas, accepting overlap",
                    attempts,
                    bounds.width,
                    bounds.height
                );
                break;
            }
            candidate = sample_position(bounds, rules.spawn_margin, rng);
            attempts += 1;
        }

        targets.push(Target::new(
            next_id(),
            candidate,
            rules.target_radius,
            rules.target_points,
            rules.max_speed,
            rng,
        ));
    }
}

/// Whether `pos` is closer than `min_separation` to any placed target
pub fn overlaps(targets: &[Target], pos: Vec2, min_separation: f32) -> bool {
    targets
        .iter()
        .any(|t| t.pos.distance(pos) < min_separation)
}

fn sample_position<R: Rng>(bounds: Bounds, margin: f32, rng: &mut R) -> Vec2 {
    Vec2::new(
        sample_axis(bounds.width, margin, rng),
        sample_axis(bounds.height, margin, rng),
    )
}

/// Uniform in `[margin, extent - margin]`, or the center line if that range is empty
fn sample_axis<R: Rng>(extent: f32, margin: f32, rng: &mut R) -> f32 {
    let lo = margin;
    let hi = extent - margin;
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        extent / 2.0
    }
}
