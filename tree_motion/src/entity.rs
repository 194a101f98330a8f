//! A single animated unit (ornament, star, …) and its per-frame update.
//!
//! Position follows a frame-rate independent exponential approach:
//!
//! ```text
//! position ← position + (target − position) · min(1, speed · δ)
//! ```
//!
//! Orientation is kept as a *base* rotation that is slerped toward a look-at
//! goal, plus a small time-varying offset (sway or wobble) composed on top
//! when the transform is read.  The offset is never fed back into the base,
//! so it cannot accumulate.

use glam::{EulerRot, Mat3, Quat, Vec3};

use crate::layout::CAMERA_ANCHOR;
use crate::mode::TreeMode;

// ════════════════════════════════════════════════════════════════════════════
// Motion constants
// ════════════════════════════════════════════════════════════════════════════

/// Slerp rate for orientation (per second), independent of entity speed.
pub const ORIENT_RATE: f32 = 3.0;

/// Formed sway about Z.
const SWAY_AMPLITUDE: f32 = 0.08;
const SWAY_FREQ:      f32 = 2.0;
/// Formed tilt about X.
const TILT_AMPLITUDE: f32 = 0.05;
const TILT_FREQ:      f32 = 1.5;

/// Chaos wobble, about X and Z.
const WOBBLE_AMPLITUDE: f32 = 0.03;
const WOBBLE_FREQ_X:    f32 = 1.5;
const WOBBLE_FREQ_Z:    f32 = 1.2;

/// Sway fades in over this distance from the formed target.
pub const SETTLE_DISTANCE: f32 = 0.5;

/// Spinning entities: formed spin rate about Z, chaos tumble rates.
const SPIN_FORMED_Z: f32 = 0.5;
const TUMBLE_X:      f32 = 2.0;
const TUMBLE_Y:      f32 = 3.0;
/// Spinning entities bob vertically around their formed target.
const BOB_AMPLITUDE: f32 = 0.1;
const BOB_FREQ:      f32 = 2.0;

const MIN_SPEED: f32 = 1e-3;

// ════════════════════════════════════════════════════════════════════════════
// Transform / Orientation
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Transform { position, rotation: Quat::IDENTITY }
    }
}

/// How an entity orients itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Rotation is never touched.
    Fixed,
    /// Hanging frame: faces outward from the trunk when formed, faces the
    /// camera anchor in chaos; sways when settled.
    Hanging,
    /// Ornament that spins slowly and bobs when formed, tumbles in chaos.
    Spinning,
}

/// Rotation whose +Z axis points along `forward` (Y up).
pub fn look_rotation(forward: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else { return Quat::IDENTITY };
    let up = if z.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let x = up.cross(z).normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

// ════════════════════════════════════════════════════════════════════════════
// AnimatedEntity
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct AnimatedEntity {
    chaos_target:  Vec3,
    formed_target: Vec3,
    transform:     Transform,
    base_rotation: Quat,
    speed:         f32,
    /// Desynchronises secondary motion between entities.
    phase:         f32,
    orientation:   Orientation,
}

impl AnimatedEntity {
    /// New entity resting at its chaos target.
    pub fn new(
        chaos_target:  Vec3,
        formed_target: Vec3,
        speed:         f32,
        phase:         f32,
        orientation:   Orientation,
    ) -> Self {
        AnimatedEntity {
            chaos_target,
            formed_target,
            transform:     Transform::at(chaos_target),
            base_rotation: Quat::IDENTITY,
            speed:         speed.max(MIN_SPEED),
            phase,
            orientation,
        }
    }

    /// Start somewhere other than the chaos target.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn transform(&self)     -> &Transform   { &self.transform }
    pub fn position(&self)      -> Vec3         { self.transform.position }
    pub fn speed(&self)         -> f32          { self.speed }
    pub fn phase(&self)         -> f32          { self.phase }
    pub fn orientation(&self)   -> Orientation  { self.orientation }
    pub fn chaos_target(&self)  -> Vec3         { self.chaos_target }
    pub fn formed_target(&self) -> Vec3         { self.formed_target }

    /// The resting target for `mode` (without secondary motion).
    pub fn target(&self, mode: TreeMode) -> Vec3 {
        match mode {
            TreeMode::Formed => self.formed_target,
            TreeMode::Chaos  => self.chaos_target,
        }
    }

    pub fn distance_to_target(&self, mode: TreeMode) -> f32 {
        self.transform.position.distance(self.target(mode))
    }

    /// Replace both targets; the current transform is kept so the entity
    /// glides to its new place instead of jumping.
    pub fn retarget(&mut self, chaos_target: Vec3, formed_target: Vec3) {
        self.chaos_target = chaos_target;
        self.formed_target = formed_target;
    }

    // ── per-frame update ──────────────────────────────────────────────────

    /// Advance one rendered frame.  `delta` is the frame time in seconds,
    /// `time` the scene clock.
    pub fn update(&mut self, mode: TreeMode, delta: f32, time: f32) {
        let delta = delta.max(0.0);
        let target = self.moving_target(mode, time);
        let step = (self.speed * delta).min(1.0);
        self.transform.position += (target - self.transform.position) * step;

        match self.orientation {
            Orientation::Fixed    => {}
            Orientation::Hanging  => self.orient_hanging(mode, delta, time),
            Orientation::Spinning => self.orient_spinning(mode, delta, time),
        }
    }

    fn moving_target(&self, mode: TreeMode, time: f32) -> Vec3 {
        let target = self.target(mode);
        if self.orientation == Orientation::Spinning && mode.is_formed() {
            target + Vec3::Y * (time * BOB_FREQ).sin() * BOB_AMPLITUDE
        } else {
            target
        }
    }

    fn orient_hanging(&mut self, mode: TreeMode, delta: f32, time: f32) {
        let pos = self.transform.position;
        let goal = match mode {
            // Face away from the trunk axis at our own height.
            TreeMode::Formed => look_rotation(Vec3::new(pos.x, 0.0, pos.z)),
            TreeMode::Chaos  => look_rotation(CAMERA_ANCHOR - pos),
        };
        let blend = (ORIENT_RATE * delta).min(1.0);
        self.base_rotation = self.base_rotation.slerp(goal, blend).normalize();

        let offset = match mode {
            TreeMode::Formed => {
                let settle = self.settle();
                let sway = (time * SWAY_FREQ + self.phase).sin() * SWAY_AMPLITUDE * settle;
                let tilt = (time * TILT_FREQ + self.phase).cos() * TILT_AMPLITUDE * settle;
                Quat::from_rotation_z(sway) * Quat::from_rotation_x(tilt)
            }
            TreeMode::Chaos => {
                let wx = (time * WOBBLE_FREQ_X + self.phase).sin() * WOBBLE_AMPLITUDE;
                let wz = (time * WOBBLE_FREQ_Z + self.phase).cos() * WOBBLE_AMPLITUDE;
                Quat::from_rotation_x(wx) * Quat::from_rotation_z(wz)
            }
        };
        self.transform.rotation = self.base_rotation * offset;
    }

    fn orient_spinning(&mut self, mode: TreeMode, delta: f32, time: f32) {
        self.base_rotation = match mode {
            TreeMode::Formed => {
                let goal = Quat::from_rotation_z(time * SPIN_FORMED_Z);
                let blend = (ORIENT_RATE * delta).min(1.0);
                self.base_rotation.slerp(goal, blend)
            }
            TreeMode::Chaos => {
                let tumble = Quat::from_euler(EulerRot::XYZ, TUMBLE_X * delta, TUMBLE_Y * delta, 0.0);
                self.base_rotation * tumble
            }
        }
        .normalize();
        self.transform.rotation = self.base_rotation;
    }

    /// 1.0 once sitting on the formed target, fading to 0.0 at
    /// [`SETTLE_DISTANCE`].
    pub fn settle(&self) -> f32 {
        let d = self.distance_to_target(TreeMode::Formed);
        (1.0 - d / SETTLE_DISTANCE).clamp(0.0, 1.0)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn fixed(chaos: Vec3, formed: Vec3, speed: f32) -> AnimatedEntity {
        AnimatedEntity::new(chaos, formed, speed, 0.0, Orientation::Fixed)
    }

    #[test]
    fn starts_at_chaos_target() {
        let e = fixed(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, 1.0);
        assert_eq!(e.position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        let mut e = fixed(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO, 2.0);
        let mut last = e.distance_to_target(TreeMode::Formed);
        for frame in 0..600 {
            e.update(TreeMode::Formed, DT, frame as f32 * DT);
            let d = e.distance_to_target(TreeMode::Formed);
            assert!(d < last || d == 0.0, "frame {}: {} !< {}", frame, d, last);
            // Never crosses the target along x.
            assert!(e.position().x >= 0.0);
            last = d;
            if d < 1e-4 { break; }
        }
        assert!(last < 1e-2);
    }

    #[test]
    fn huge_delta_snaps_exactly() {
        let mut e = fixed(Vec3::ONE, Vec3::new(4.0, 5.0, 6.0), 2.0);
        e.update(TreeMode::Formed, 10.0, 0.0);
        assert_eq!(e.position(), Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn mode_switch_redirects_from_current_position() {
        let chaos = Vec3::new(0.0, 0.0, 10.0);
        let mut e = fixed(chaos, Vec3::ZERO, 1.0);
        for f in 0..30 { e.update(TreeMode::Formed, DT, f as f32 * DT); }
        let midway = e.position();
        assert!(midway.z > 0.0 && midway.z < 10.0);

        e.update(TreeMode::Chaos, DT, 0.5);
        let after = e.position();
        // One small step back toward chaos, not a jump.
        assert!(after.z > midway.z);
        assert!(after.distance(midway) < 0.2);
    }

    #[test]
    fn retarget_keeps_position() {
        let mut e = fixed(Vec3::X, Vec3::Y, 1.0);
        let before = e.position();
        e.retarget(Vec3::Z, Vec3::NEG_Z);
        assert_eq!(e.position(), before);
        assert_eq!(e.target(TreeMode::Chaos), Vec3::Z);
    }

    #[test]
    fn converged_entity_stays_put() {
        let target = Vec3::new(2.0, 3.0, 4.0);
        let mut e = fixed(Vec3::ZERO, target, 1.0).with_position(target);
        for f in 0..100 { e.update(TreeMode::Formed, DT, f as f32 * DT); }
        assert!(e.position().distance(target) < 1e-6);
    }

    #[test]
    fn look_rotation_points_z_forward() {
        let q = look_rotation(Vec3::new(1.0, 0.0, 0.0));
        let z = q * Vec3::Z;
        assert!(z.distance(Vec3::X) < 1e-5);
        assert_eq!(look_rotation(Vec3::ZERO), Quat::IDENTITY);
    }

    #[test]
    fn hanging_faces_outward_when_formed() {
        let formed = Vec3::new(3.0, 4.0, 0.0);
        let mut e = AnimatedEntity::new(Vec3::new(0.0, 5.0, 16.0), formed, 2.0, 0.0, Orientation::Hanging)
            .with_position(formed);
        for f in 0..600 { e.update(TreeMode::Formed, DT, f as f32 * DT); }
        let facing = e.transform().rotation * Vec3::Z;
        // Outward (+X) give or take the sway.
        assert!(facing.x > 0.95, "facing {:?}", facing);
    }

    #[test]
    fn hanging_faces_camera_in_chaos() {
        let chaos = Vec3::new(4.0, 5.0, 16.0);
        let mut e = AnimatedEntity::new(chaos, Vec3::ZERO, 1.0, 0.0, Orientation::Hanging);
        for f in 0..600 { e.update(TreeMode::Chaos, DT, f as f32 * DT); }
        let facing = e.transform().rotation * Vec3::Z;
        let wanted = (CAMERA_ANCHOR - chaos).normalize();
        assert!(facing.dot(wanted) > 0.99, "facing {:?} wanted {:?}", facing, wanted);
    }

    #[test]
    fn sway_only_when_settled() {
        let e = AnimatedEntity::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, 0.0, Orientation::Hanging);
        assert_eq!(e.settle(), 0.0);
        let e = e.with_position(Vec3::ZERO);
        assert_eq!(e.settle(), 1.0);
    }

    #[test]
    fn sway_does_not_accumulate() {
        let formed = Vec3::new(3.0, 4.0, 0.0);
        let mut e = AnimatedEntity::new(formed, formed, 1.0, 1.3, Orientation::Hanging);
        for f in 0..6000 { e.update(TreeMode::Formed, DT, f as f32 * DT); }
        let facing = e.transform().rotation * Vec3::Z;
        assert!(facing.x > 0.95);
    }

    #[test]
    fn spinning_entity_bobs_around_formed_target() {
        let formed = Vec3::new(0.0, 13.0, 0.0);
        let mut e = AnimatedEntity::new(Vec3::new(5.0, 20.0, 5.0), formed, 1.5, 0.0, Orientation::Spinning);
        let mut max_dev: f32 = 0.0;
        for f in 0..1200 {
            e.update(TreeMode::Formed, DT, f as f32 * DT);
            if f > 600 { max_dev = max_dev.max(e.distance_to_target(TreeMode::Formed)); }
        }
        assert!(max_dev > 0.01 && max_dev <= 0.11, "bob {}", max_dev);
    }

    #[test]
    fn spinning_entity_tumbles_in_chaos() {
        let mut e = AnimatedEntity::new(Vec3::ZERO, Vec3::ONE, 1.0, 0.0, Orientation::Spinning);
        e.update(TreeMode::Chaos, 0.1, 0.0);
        assert_ne!(e.transform().rotation, Quat::IDENTITY);
        assert!((e.transform().rotation.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn non_positive_speed_is_clamped() {
        let e = fixed(Vec3::ZERO, Vec3::ONE, 0.0);
        assert!(e.speed() > 0.0);
    }
}
