//! Target layouts for the two configurations.
//!
//! Scene space: Y up, trunk along the Y axis, tree base at `y = 0`, camera
//! looking from `+Z`.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;

/// Where the camera sits; chaos-mode frames turn to face it.
pub const CAMERA_ANCHOR: Vec3 = Vec3::new(0.0, 9.0, 20.0);

/// φ, spacing factor of the foliage spiral.
pub const GOLDEN_RATIO: f32 = 1.618_034;

/// Golden angle in radians, spacing for the ornament spiral.
pub const GOLDEN_ANGLE: f32 = 2.39996;

// ── foliage ───────────────────────────────────────────────────────────────

pub const FOLIAGE_HEIGHT:      f32 = 12.0;
pub const FOLIAGE_RADIUS:      f32 = 5.0;
const FOLIAGE_CHAOS_RADIUS:    f32 = 25.0;
const FOLIAGE_CHAOS_LIFT:      f32 = 5.0;

/// Point `i` of `count` on a spiral cone: radius shrinks linearly to the tip.
pub fn foliage_formed(i: usize, count: usize) -> Vec3 {
    let y_norm = i as f32 / count.max(1) as f32;
    let radius = FOLIAGE_RADIUS * (1.0 - y_norm);
    let angle = TAU * GOLDEN_RATIO * i as f32;
    Vec3::new(angle.cos() * radius, y_norm * FOLIAGE_HEIGHT, angle.sin() * radius)
}

/// Uniformly distributed point in a ball, lifted a little off the floor.
pub fn foliage_chaos<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let r = FOLIAGE_CHAOS_RADIUS * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin() + FOLIAGE_CHAOS_LIFT,
        r * phi.cos(),
    )
}

// ── ornaments ─────────────────────────────────────────────────────────────

const ORNAMENT_HEIGHT:     f32 = 9.0;
const ORNAMENT_RADIUS:     f32 = 5.0;
/// Keeps frames floating just outside the foliage.
const ORNAMENT_CLEARANCE:  f32 = 0.8;
const ORNAMENT_BAND_START: f32 = 0.2;
const ORNAMENT_BAND_SPAN:  f32 = 0.6;

/// Frame `i` of `count` on the tree surface, between 20% and 80% height,
/// spaced by the golden angle.
pub fn ornament_formed(i: usize, count: usize) -> Vec3 {
    let y_norm = ORNAMENT_BAND_START + (i as f32 / count.max(1) as f32) * ORNAMENT_BAND_SPAN;
    let radius = ORNAMENT_RADIUS * (1.0 - y_norm) + ORNAMENT_CLEARANCE;
    let theta = i as f32 * GOLDEN_ANGLE;
    Vec3::new(radius * theta.cos(), y_norm * ORNAMENT_HEIGHT, radius * theta.sin())
}

/// Frame `i` of `count` scattered on a ring just in front of the camera.
pub fn ornament_chaos<R: Rng + ?Sized>(i: usize, count: usize, rng: &mut R) -> Vec3 {
    let angle = i as f32 / count.max(1) as f32 * TAU;
    let distance = 3.0 + rng.gen::<f32>() * 4.0;
    let height_spread = (rng.gen::<f32>() - 0.5) * 8.0;
    Vec3::new(
        distance * angle.cos() * 1.2,
        5.0 + height_spread,
        CAMERA_ANCHOR.z - 4.0 + distance * angle.sin() * 0.5,
    )
}

// ── star ──────────────────────────────────────────────────────────────────

/// Tree-top, a little above the foliage tip.
pub const STAR_FORMED: Vec3 = Vec3::new(0.0, 13.0, 0.0);

pub fn star_chaos<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen::<f32>() * 20.0 - 10.0,
        15.0 + rng.gen::<f32>() * 10.0,
        rng.gen::<f32>() * 20.0 - 10.0,
    )
}

/// Outline of a five-pointed star in its local XY plane, starting at the
/// top point, alternating outer and inner vertices.
pub fn star_outline(outer: f32, inner: f32) -> [glam::Vec2; 10] {
    let mut pts = [glam::Vec2::ZERO; 10];
    for (i, p) in pts.iter_mut().enumerate() {
        let angle = i as f32 * PI / 5.0 + PI / 2.0;
        let r = if i % 2 == 0 { outer } else { inner };
        *p = glam::Vec2::new(angle.cos() * r, angle.sin() * r);
    }
    pts
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
