//! Photo frames hung on the tree.
//!
//! The photo collection is supplied from outside as an ordered list of keys.
//! Every [`OrnamentSet::sync`] re-derives all targets for the new count, but
//! frames whose key survives keep their current transform, speed and phase,
//! so a growing collection never makes existing frames jump.

use rand::Rng;

use crate::entity::{AnimatedEntity, Orientation};
use crate::layout::{ornament_chaos, ornament_formed};
use crate::mode::TreeMode;

const MIN_SPEED:  f32 = 0.8;
const SPEED_SPAN: f32 = 1.5;
const PHASE_SPAN: f32 = 100.0;

// ════════════════════════════════════════════════════════════════════════════
// Ornament
// ════════════════════════════════════════════════════════════════════════════

/// Load state of a frame's picture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureState {
    Loading,
    Loaded,
    /// The source could not be read; a placeholder is drawn instead.
    Missing,
}

#[derive(Clone, Debug)]
pub struct Ornament {
    pub key:     String,
    pub entity:  AnimatedEntity,
    pub texture: TextureState,
}

impl Ornament {
    /// Caption printed under the picture.
    pub fn caption(&self) -> &'static str {
        match self.texture {
            TextureState::Missing => "Image not found",
            _                     => "Happy Memories",
        }
    }
}

/// Outcome of a [`OrnamentSet::sync`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created: usize,
    pub kept:    usize,
    pub removed: usize,
}

// ════════════════════════════════════════════════════════════════════════════
// OrnamentSet
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct OrnamentSet {
    ornaments: Vec<Ornament>,
}

impl OrnamentSet {
    pub fn new() -> Self { OrnamentSet::default() }

    pub fn len(&self) -> usize { self.ornaments.len() }
    pub fn is_empty(&self) -> bool { self.ornaments.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, Ornament> { self.ornaments.iter() }

    pub fn get(&self, key: &str) -> Option<&Ornament> {
        self.ornaments.iter().find(|o| o.key == key)
    }

    /// Rebuild the set to match `keys` (in order).
    pub fn sync<R: Rng + ?Sized>(&mut self, keys: &[String], rng: &mut R) -> SyncReport {
        let count = keys.len();
        let mut previous = std::mem::take(&mut self.ornaments);
        let mut report = SyncReport::default();

        for (i, key) in keys.iter().enumerate() {
            let formed = ornament_formed(i, count);
            let chaos = ornament_chaos(i, count, rng);

            match previous.iter().position(|o| o.key == *key) {
                Some(at) => {
                    let mut kept = previous.swap_remove(at);
                    kept.entity.retarget(chaos, formed);
                    self.ornaments.push(kept);
                    report.kept += 1;
                }
                None => {
                    let speed = MIN_SPEED + rng.gen::<f32>() * SPEED_SPAN;
                    let phase = rng.gen::<f32>() * PHASE_SPAN;
                    self.ornaments.push(Ornament {
                        key:     key.clone(),
                        entity:  AnimatedEntity::new(chaos, formed, speed, phase, Orientation::Hanging),
                        texture: TextureState::Loading,
                    });
                    report.created += 1;
                }
            }
        }

        report.removed = previous.len();
        if report.created + report.removed > 0 {
            log::debug!(
                "ornaments synced: {} created, {} kept, {} removed",
                report.created, report.kept, report.removed
            );
        }
        report
    }

    /// Record the load outcome of `key`'s picture.  Returns false for an
    /// unknown key.
    pub fn set_texture(&mut self, key: &str, state: TextureState) -> bool {
        match self.ornaments.iter_mut().find(|o| o.key == key) {
            Some(o) => { o.texture = state; true }
            None    => false,
        }
    }

    pub fn update(&mut self, mode: TreeMode, delta: f32, time: f32) {
        for o in &mut self.ornaments {
            o.entity.update(mode, delta, time);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GOLDEN_ANGLE;
    use glam::Vec3;
    use rand::{rngs::StdRng, SeedableRng};

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("photo-{}.jpg", i)).collect()
    }

    #[test]
    fn growing_from_zero_to_five_creates_five_distinct_frames() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut set = OrnamentSet::new();
        assert_eq!(set.sync(&[], &mut rng), SyncReport::default());

        let report = set.sync(&keys(5), &mut rng);
        assert_eq!(report.created, 5);
        assert_eq!(set.len(), 5);

        let formed: Vec<Vec3> = set.iter().map(|o| o.entity.formed_target()).collect();
        let chaos: Vec<Vec3> = set.iter().map(|o| o.entity.chaos_target()).collect();
        for a in 0..5 {
            for b in (a + 1)..5 {
                assert!(formed[a].distance(formed[b]) > 1e-3);
                assert!(chaos[a].distance(chaos[b]) > 1e-3);
            }
        }

        // Golden-angle spacing around the trunk.
        for (i, f) in formed.iter().enumerate() {
            let theta = f.z.atan2(f.x);
            let expected = (i as f32 * GOLDEN_ANGLE).sin().atan2((i as f32 * GOLDEN_ANGLE).cos());
            assert!((theta - expected).abs() < 1e-4, "frame {}", i);
        }
    }

    #[test]
    fn new_frames_start_at_chaos_target_and_load() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut set = OrnamentSet::new();
        set.sync(&keys(3), &mut rng);
        for o in set.iter() {
            assert_eq!(o.entity.position(), o.entity.chaos_target());
            assert_eq!(o.texture, TextureState::Loading);
            assert!(o.entity.speed() >= 0.8 && o.entity.speed() < 2.3);
            assert_eq!(o.entity.orientation(), Orientation::Hanging);
        }
    }

    #[test]
    fn persisting_frames_keep_animation_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut set = OrnamentSet::new();
        set.sync(&keys(2), &mut rng);
        for f in 0..30 { set.update(TreeMode::Formed, 1.0 / 60.0, f as f32 / 60.0); }
        set.set_texture("photo-0.jpg", TextureState::Loaded);

        let before = set.get("photo-0.jpg").unwrap().entity.clone();
        let report = set.sync(&keys(4), &mut rng);
        assert_eq!(report, SyncReport { created: 2, kept: 2, removed: 0 });

        let after = set.get("photo-0.jpg").unwrap();
        assert_eq!(after.entity.position(), before.position());
        assert_eq!(after.entity.speed(), before.speed());
        assert_eq!(after.entity.phase(), before.phase());
        assert_eq!(after.texture, TextureState::Loaded);
    }

    #[test]
    fn shrinking_drops_missing_keys() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut set = OrnamentSet::new();
        set.sync(&keys(4), &mut rng);
        let report = set.sync(&keys(1), &mut rng);
        assert_eq!(report.removed, 3);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn missing_texture_changes_caption() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut set = OrnamentSet::new();
        set.sync(&keys(1), &mut rng);
        assert_eq!(set.iter().next().unwrap().caption(), "Happy Memories");
        assert!(set.set_texture("photo-0.jpg", TextureState::Missing));
        assert_eq!(set.iter().next().unwrap().caption(), "Image not found");
        assert!(!set.set_texture("nope", TextureState::Missing));
    }
}
