//! The star on top of the tree.

use glam::Vec2;
use rand::Rng;

use crate::entity::{AnimatedEntity, Orientation, Transform};
use crate::layout::{star_chaos, star_outline, STAR_FORMED};
use crate::mode::TreeMode;

const STAR_SPEED:   f32 = 1.5;
const OUTER_RADIUS: f32 = 0.8;
const INNER_RADIUS: f32 = 0.32;

#[derive(Clone, Debug)]
pub struct Star {
    entity:  AnimatedEntity,
    outline: [Vec2; 10],
}

impl Star {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let entity = AnimatedEntity::new(
            star_chaos(rng),
            STAR_FORMED,
            STAR_SPEED,
            0.0,
            Orientation::Spinning,
        )
        .with_position(STAR_FORMED);
        Star { entity, outline: star_outline(OUTER_RADIUS, INNER_RADIUS) }
    }

    pub fn update(&mut self, mode: TreeMode, delta: f32, time: f32) {
        self.entity.update(mode, delta, time);
    }

    pub fn transform(&self) -> &Transform { self.entity.transform() }
    pub fn entity(&self) -> &AnimatedEntity { &self.entity }

    /// Local-space outline (XY plane), outer and inner points alternating.
    pub fn outline(&self) -> &[Vec2; 10] { &self.outline }

    /// Pulsing glow intensity, `1.5..=2.5`.
    pub fn glow(&self, time: f32) -> f32 {
        2.0 + (time * 3.0).sin() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn starts_on_tree_top_and_flies_off_in_chaos() {
        let mut star = Star::new(&mut StdRng::seed_from_u64(5));
        assert_eq!(star.transform().position, STAR_FORMED);
        for f in 0..600 {
            star.update(TreeMode::Chaos, 1.0 / 60.0, f as f32 / 60.0);
        }
        let chaos = star.entity().chaos_target();
        assert!(star.transform().position.distance(chaos) < 0.01);
    }

    #[test]
    fn glow_pulses_within_bounds() {
        let star = Star::new(&mut StdRng::seed_from_u64(5));
        for k in 0..100 {
            let g = star.glow(k as f32 * 0.1);
            assert!((1.5..=2.5).contains(&g));
        }
    }
}
