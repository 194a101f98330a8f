//! Orbit camera steered by the palm position.

use glam::{Mat4, Vec3};
use hand_gesture::HandPosition;
use tree_motion::layout::CAMERA_ANCHOR;

/// Point the camera orbits and looks at.
pub const LOOK_AT: Vec3 = Vec3::new(0.0, 6.0, 0.0);

/// Yaw at the image edge, radians.
pub const MAX_YAW:   f32 = 0.6;
/// Pitch at the image edge, radians.
pub const MAX_PITCH: f32 = 0.3;
/// Exponential follow rate, 1/s.
pub const FOLLOW_RATE: f32 = 2.5;

#[derive(Clone, Debug)]
pub struct CameraRig {
    yaw:        f32,
    pitch:      f32,
    distance:   f32,
    base_pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self { CameraRig::new() }
}

impl CameraRig {
    /// At rest the eye sits on the scene's camera anchor.
    pub fn new() -> Self {
        let offset = CAMERA_ANCHOR - LOOK_AT;
        CameraRig {
            yaw:        0.0,
            pitch:      0.0,
            distance:   offset.length(),
            base_pitch: offset.y.atan2(offset.z),
        }
    }

    pub fn yaw(&self)   -> f32 { self.yaw }
    pub fn pitch(&self) -> f32 { self.pitch }

    /// Angles the palm asks for.  Camera images are not mirrored, so image
    /// x is flipped: the user's hand moving right swings the view right.
    /// No hand means centred.
    pub fn aim(hand: &HandPosition) -> (f32, f32) {
        if !hand.detected {
            return (0.0, 0.0);
        }
        let x = hand.x.clamp(0.0, 1.0);
        let y = hand.y.clamp(0.0, 1.0);
        ((0.5 - x) * 2.0 * MAX_YAW, (y - 0.5) * 2.0 * MAX_PITCH)
    }

    pub fn update(&mut self, hand: &HandPosition, delta: f32) {
        let (yaw, pitch) = CameraRig::aim(hand);
        let t = (FOLLOW_RATE * delta).min(1.0);
        self.yaw += (yaw - self.yaw) * t;
        self.pitch += (pitch - self.pitch) * t;
    }

    pub fn eye(&self) -> Vec3 {
        let p = self.base_pitch + self.pitch;
        LOOK_AT + self.distance * Vec3::new(self.yaw.sin() * p.cos(), p.sin(), self.yaw.cos() * p.cos())
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), LOOK_AT, Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(x: f32, y: f32) -> HandPosition {
        HandPosition { x, y, detected: true }
    }

    #[test]
    fn rest_position_is_the_anchor() {
        let rig = CameraRig::new();
        assert!(rig.eye().distance(CAMERA_ANCHOR) < 1e-4);
    }

    #[test]
    fn absent_hand_means_centre() {
        assert_eq!(CameraRig::aim(&HandPosition::absent()), (0.0, 0.0));
        assert_eq!(CameraRig::aim(&hand(0.5, 0.5)), (0.0, 0.0));
    }

    #[test]
    fn image_x_is_mirrored() {
        // Image's left edge is the user's right.
        let (yaw, _) = CameraRig::aim(&hand(0.0, 0.5));
        assert!((yaw - MAX_YAW).abs() < 1e-6);
        let mut rig = CameraRig::new();
        for _ in 0..300 {
            rig.update(&hand(0.0, 0.5), 1.0 / 60.0);
        }
        assert!(rig.eye().x > 0.0);
    }

    #[test]
    fn eases_back_when_hand_lost() {
        let mut rig = CameraRig::new();
        for _ in 0..120 {
            rig.update(&hand(0.0, 0.0), 1.0 / 60.0);
        }
        let away = rig.yaw().abs();
        assert!(away > 0.3);
        rig.update(&HandPosition::absent(), 1.0 / 60.0);
        assert!(rig.yaw().abs() < away);
        for _ in 0..600 {
            rig.update(&HandPosition::absent(), 1.0 / 60.0);
        }
        assert!(rig.yaw().abs() < 1e-3 && rig.pitch().abs() < 1e-3);
    }
}
