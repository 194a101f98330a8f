//! The foliage particle field.
//!
//! Thousands of points share one progress scalar that chases 1.0 (formed) or
//! 0.0 (chaos).  Each particle derives a staggered, eased local progress from
//! it so the cloud does not move in lockstep.  Once a particle is nearly in
//! place it "breathes" with a small wind offset; its colour fades from chaos
//! gold to emerald as it forms.

use glam::Vec3;
use rand::Rng;

use crate::layout::{foliage_chaos, foliage_formed};
use crate::mode::TreeMode;

/// Rate (per second) at which the shared progress chases its target.
pub const PROGRESS_RATE: f32 = 1.5;

const STAGGER:           f32 = 0.2;
const BREATH_THRESHOLD:  f32 = 0.9;
const BREATH_AMPLITUDE:  f32 = 0.05;
const SPARKLE_THRESHOLD: f32 = 0.9;

const GOLD:         [f32; 3] = [1.0, 0.84, 0.0];
const EMERALD:      [f32; 3] = [0.0, 0.4, 0.1];
const BRIGHT_GREEN: [f32; 3] = [0.1, 0.8, 0.2];

// ════════════════════════════════════════════════════════════════════════════
// Particle / sample
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageParticle {
    pub chaos:  Vec3,
    pub formed: Vec3,
    /// Per-particle random in `[0, 1)`: stagger, size, tint and sparkle.
    pub random: f32,
}

/// What the renderer draws for one particle this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoliageSample {
    pub position: Vec3,
    /// Linear RGB, may exceed 1.0 while sparkling.
    pub color:    [f32; 3],
    /// Relative point size, `2.0..6.0`.
    pub size:     f32,
}

/// Cubic ease-in-out on `[0, 1]`.
pub fn cubic_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

// ════════════════════════════════════════════════════════════════════════════
// FoliageField
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct FoliageField {
    particles: Vec<FoliageParticle>,
    progress:  f32,
}

impl FoliageField {
    /// Build `count` particles, starting scattered.
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|i| FoliageParticle {
                chaos:  foliage_chaos(rng),
                formed: foliage_formed(i, count),
                random: rng.gen(),
            })
            .collect();
        FoliageField { particles, progress: 0.0 }
    }

    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    pub fn particles(&self) -> &[FoliageParticle] { &self.particles }

    /// Shared progress, 0.0 = chaos, 1.0 = formed.
    pub fn progress(&self) -> f32 { self.progress }

    /// Advance the shared progress toward the mode's target.
    pub fn tick(&mut self, mode: TreeMode, delta: f32) {
        let target = if mode.is_formed() { 1.0 } else { 0.0 };
        let step = (delta.max(0.0) * PROGRESS_RATE).min(1.0);
        self.progress += (target - self.progress) * step;
    }

    /// Staggered, eased progress of one particle.
    pub fn local_progress(&self, random: f32) -> f32 {
        let local = (self.progress * (1.0 + STAGGER) - random * STAGGER).clamp(0.0, 1.0);
        cubic_in_out(local)
    }

    pub fn sample(&self, index: usize, time: f32) -> Option<FoliageSample> {
        self.particles.get(index).map(|p| self.sample_particle(p, time))
    }

    pub fn samples(&self, time: f32) -> impl Iterator<Item = FoliageSample> + '_ {
        self.particles.iter().map(move |p| self.sample_particle(p, time))
    }

    fn sample_particle(&self, p: &FoliageParticle, time: f32) -> FoliageSample {
        let eased = self.local_progress(p.random);
        let mut position = p.chaos.lerp(p.formed, eased);

        if eased > BREATH_THRESHOLD {
            position.x += (time * 2.0 + position.y).sin() * BREATH_AMPLITUDE;
            position.z += (time * 1.5 + position.y).cos() * BREATH_AMPLITUDE;
        }

        let green = mix(EMERALD, BRIGHT_GREEN, p.random * 0.3);
        let mut color = mix(GOLD, green, eased);
        if (time * 5.0 + p.random * 100.0).sin() > SPARKLE_THRESHOLD {
            for c in &mut color { *c += 0.5; }
        }

        FoliageSample {
            position,
            color,
            size: 4.0 * p.random + 2.0,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
