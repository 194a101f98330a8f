//! # tree_motion
//!
//! The mode-driven motion model behind the Christmas-tree scene.
//!
//! Every renderable unit owns a pair of targets: one for the scattered
//! **chaos** cloud, one for the **formed** tree. It converges toward the
//! target selected by the current [`TreeMode`] every rendered frame.
//!
//! | Type | Renders as | Motion |
//! |---|---|---|
//! | [`FoliageField`] | thousands of glowing points | shared eased progress, staggered per particle |
//! | [`Star`] | tree-top star | exponential approach, tumbling / slow spin |
//! | [`OrnamentSet`] | hanging photo frames | exponential approach, look-at + sway |
//!
//! The mode itself lives in a single [`ModeSwitch`]; both the explicit UI
//! toggle and the gesture classifier write through it.
//!
//! ## Quick start
//!
//! ```rust
//! use rand::{rngs::StdRng, SeedableRng};
//! use tree_motion::{FoliageField, ModeSource, ModeSwitch, Star, TreeMode};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut mode = ModeSwitch::new(TreeMode::Chaos);
//! let mut foliage = FoliageField::new(500, &mut rng);
//! let mut star = Star::new(&mut rng);
//!
//! mode.set(TreeMode::Formed, ModeSource::Toggle);
//! for frame in 0..120 {
//!     let time = frame as f32 / 60.0;
//!     foliage.tick(mode.mode(), 1.0 / 60.0);
//!     star.update(mode.mode(), 1.0 / 60.0, time);
//! }
//! assert!(foliage.progress() > 0.9);
//! ```

pub mod mode;
pub mod entity;
pub mod layout;
pub mod foliage;
pub mod star;
pub mod ornaments;

pub use mode::{ModeChange, ModeSource, ModeSwitch, TreeMode};
pub use entity::{AnimatedEntity, Orientation, Transform};
pub use foliage::{FoliageField, FoliageParticle, FoliageSample};
pub use star::Star;
pub use ornaments::{Ornament, OrnamentSet, SyncReport, TextureState};
