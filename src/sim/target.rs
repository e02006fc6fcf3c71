//! Bouncing circular targets

use glam::Vec2;
use rand::Rng;

/// Canvas rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Whether a circle lies entirely inside the rectangle
    pub fn contains_circle(&self, center: Vec2, radius: f32) -> bool {
        center.x - radius >= 0.0
            && center.x + radius <= self.width
            && center.y - radius >= 0.0
            && center.y + radius <= self.height
    }
}

/// A shootable target
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    /// Units per frame
    pub vel: Vec2,
    pub radius: f32,
    pub points: u32,
    /// Cosmetic hue in degrees
    pub hue: f32,
}

impl Target {
    /// Create a target with a random velocity in `[-max_speed/2, max_speed/2)` per axis
    pub fn new<R: Rng>(
        id: u32,
        pos: Vec2,
        radius: f32,
        points: u32,
        max_speed: f32,
        rng: &mut R,
    ) -> Self {
        let half = max_speed / 2.0;
        let vel = if half > 0.0 {
            Vec2::new(rng.random_range(-half..half), rng.random_range(-half..half))
        } else {
            Vec2::ZERO
        };
        Self {
            id,
            pos,
            vel,
            radius,
            points,
            hue: rng.random_range(0.0..360.0),
        }
    }

    /// Advance one frame, reflecting off canvas edges per axis
    pub fn update(&mut self, bounds: Bounds) {
        let (x, vx) = reflect_axis(self.pos.x, self.vel.x, self.radius, bounds.width);
        let (y, vy) = reflect_axis(self.pos.y, self.vel.y, self.radius, bounds.height);
        self.pos = Vec2::new(x, y);
        self.vel = Vec2::new(vx, vy);
    }

    /// Whether a point is on the target (edge inclusive)
    pub fn is_hit(&self, point: Vec2) -> bool {
        self.pos.distance_squared(point) <= self.radius * self.radius
    }
}

/// One axis of the bounce: returns the new (position, velocity).
///
/// A circle already past an edge (the canvas shrank) is clamped back onto
/// that edge and sent inward. Otherwise, if the step would push the circle
/// past an edge the velocity is negated and the reflected step is taken
/// instead. When even that leaves the canvas the position holds, which only
/// happens on a canvas narrower than the circle.
fn reflect_axis(pos: f32, vel: f32, radius: f32, extent: f32) -> (f32, f32) {
    let (lo, hi) = (radius, extent - radius);
    if lo <= hi {
        if pos < lo {
            return (lo, vel.abs());
        }
        if pos > hi {
            return (hi, -vel.abs());
        }
    }

    let inside = |p: f32| p >= lo && p <= hi;

    let next = pos + vel;
    if inside(next) {
        return (next, vel);
    }

    let vel = -vel;
    let reflected = pos + vel;
    if inside(reflected) {
        (reflected, vel)
    } else {
        (pos, vel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn target_at(pos: Vec2, vel: Vec2) -> Target {
        Target {
            id: 1,
            pos,
            vel,
            radius: 20.0,
            points: 10,
            hue: 0.0,
        }
    }

    #[test]
    fn test_is_hit_inside_and_edge() {
        let t = target_at(Vec2::new(100.0, 100.0), Vec2::ZERO);
        assert!(t.is_hit(Vec2::new(100.0, 100.0)));
        assert!(t.is_hit(Vec2::new(120.0, 100.0)));
        assert!(t.is_hit(Vec2::new(112.0, 116.0)));
        assert!(!t.is_hit(Vec2::new(120.1, 100.0)));
        assert!(!t.is_hit(Vec2::new(115.0, 115.0)));
    }

    #[test]
    fn test_update_moves_freely() {
        let mut t = target_at(Vec2::new(100.0, 100.0), Vec2::new(1.5, -1.0));
        t.update(Bounds::new(800.0, 600.0));
        assert_eq!(t.pos, Vec2::new(101.5, 99.0));
        assert_eq!(t.vel, Vec2::new(1.5, -1.0));
    }

    #[test]
    fn test_update_reflects_right_wall() {
        let mut t = target_at(Vec2::new(779.0, 300.0), Vec2::new(1.5, 0.5));
        t.update(Bounds::new(800.0, 600.0));
        assert_eq!(t.vel, Vec2::new(-1.5, 0.5));
        assert!((t.pos.x - 777.5).abs() < 1e-4);
        assert!((t.pos.y - 300.5).abs() < 1e-4);
    }

    #[test]
    fn test_update_reflects_corner_both_axes() {
        let mut t = target_at(Vec2::new(20.5, 20.5), Vec2::new(-1.0, -1.0));
        t.update(Bounds::new(800.0, 600.0));
        assert_eq!(t.vel, Vec2::new(1.0, 1.0));
        assert_eq!(t.pos, Vec2::new(21.5, 21.5));
    }

    #[test]
    fn test_update_pulls_back_after_shrink() {
        let mut t = target_at(Vec2::new(760.0, 300.0), Vec2::new(1.0, 0.0));
        let bounds = Bounds::new(700.0, 600.0);
        t.update(bounds);
        assert_eq!(t.pos.x, 680.0);
        assert_eq!(t.vel.x, -1.0);
        assert!(bounds.contains_circle(t.pos, t.radius));

        for _ in 0..600 {
            t.update(bounds);
            assert!(bounds.contains_circle(t.pos, t.radius));
        }
    }

    #[test]
    fn test_update_pulls_back_from_left_edge() {
        let mut t = target_at(Vec2::new(5.0, 300.0), Vec2::new(-1.2, 0.0));
        t.update(Bounds::new(800.0, 600.0));
        assert_eq!(t.pos.x, 20.0);
        assert!((t.vel.x - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_update_holds_on_narrow_canvas() {
        let mut t = target_at(Vec2::new(15.0, 300.0), Vec2::new(1.0, 0.0));
        t.update(Bounds::new(30.0, 600.0));
        assert_eq!(t.pos.x, 15.0);
        assert_eq!(t.vel.x, -1.0);
    }

    #[test]
    fn test_new_velocity_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..100 {
            let t = Target::new(id, Vec2::splat(50.0), 20.0, 10, 3.0, &mut rng);
            assert!(t.vel.x >= -1.5 && t.vel.x < 1.5);
            assert!(t.vel.y >= -1.5 && t.vel.y < 1.5);
            assert!((0.0..360.0).contains(&t.hue));
        }
    }

    proptest! {
        #[test]
        fn prop_update_stays_in_bounds(
            fx in 0.0f32..=1.0,
            fy in 0.0f32..=1.0,
            vx in -1.5f32..1.5,
            vy in -1.5f32..1.5,
            width in 60.0f32..1200.0,
            height in 60.0f32..900.0,
        ) {
            let bounds = Bounds::new(width, height);
            let pos = Vec2::new(
                20.0 + fx * (width - 40.0),
                20.0 + fy * (height - 40.0),
            );
            let mut t = target_at(pos, Vec2::new(vx, vy));
            for _ in 0..50 {
                let before = t.clone();
                t.update(bounds);
                prop_assert!(bounds.contains_circle(t.pos, t.radius));

                let crossed_x = !(before.pos.x + before.vel.x - 20.0 >= 0.0
                    && before.pos.x + before.vel.x + 20.0 <= width);
                let crossed_y = !(before.pos.y + before.vel.y - 20.0 >= 0.0
                    && before.pos.y + before.vel.y + 20.0 <= height);
                prop_assert_eq!(t.vel.x == -before.vel.x && before.vel.x != 0.0, crossed_x && before.vel.x != 0.0);
                prop_assert_eq!(t.vel.y == -before.vel.y && before.vel.y != 0.0, crossed_y && before.vel.y != 0.0);
            }
        }
    }
}
