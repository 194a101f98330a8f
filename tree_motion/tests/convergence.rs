//! Property tests for the exponential approach.

use glam::Vec3;
use proptest::prelude::*;
use tree_motion::{AnimatedEntity, Orientation, TreeMode};

fn vec3() -> impl Strategy<Value = Vec3> {
    (-30.0f32..30.0, -30.0f32..30.0, -30.0f32..30.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

proptest! {
    #[test]
    fn distance_shrinks_every_frame_and_never_overshoots(
        start in vec3(),
        target in vec3(),
        speed in 0.1f32..5.0,
        fps in 20.0f32..240.0,
    ) {
        prop_assume!(start.distance(target) > 0.1);
        let delta = 1.0 / fps;
        let mut e = AnimatedEntity::new(start, target, speed, 0.0, Orientation::Fixed);
        let direction = (target - start).normalize();
        let mut last = e.distance_to_target(TreeMode::Formed);

        for frame in 0..400 {
            e.update(TreeMode::Formed, delta, frame as f32 * delta);
            let d = e.distance_to_target(TreeMode::Formed);
            if last < 1e-3 { break; }
            prop_assert!(d < last, "frame {}: {} !< {}", frame, d, last);
            // Still on the start side of the target.
            prop_assert!((target - e.position()).dot(direction) >= -1e-4);
            last = d;
        }
    }

    #[test]
    fn switching_mode_never_teleports(
        chaos in vec3(),
        formed in vec3(),
        speed in 0.1f32..5.0,
        frames_before in 1usize..120,
    ) {
        let delta = 1.0 / 60.0;
        let mut e = AnimatedEntity::new(chaos, formed, speed, 0.0, Orientation::Hanging);
        for f in 0..frames_before {
            e.update(TreeMode::Formed, delta, f as f32 * delta);
        }
        let before = e.position();
        e.update(TreeMode::Chaos, delta, frames_before as f32 * delta);
        let jump = e.position().distance(before);
        let bound = before.distance(chaos) * (speed * delta).min(1.0) + 1e-4;
        prop_assert!(jump <= bound, "jump {} > {}", jump, bound);
    }
}
