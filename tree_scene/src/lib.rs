//! # tree_scene
//!
//! Windowed Christmas-tree scene driven by hand gestures.  An open hand
//! scatters the foliage, star and photo ornaments into a chaos cloud; a fist
//! pulls them back into the tree.  The palm position steers the camera.
//!
//! ## Window keys
//!
//! | Key | Action |
//! |---|---|
//! | `Space` | toggle CHAOS / FORMED |
//! | `R` | rescan the photo directory |
//! | `Q` / `Escape` | quit |
//!
//! ### Simulated hand
//!
//! When no recording is replayed, the hand comes from the keyboard
//! simulator in [`sim`]: `O` open, `F` fist, `3` three fingers, `H` hide,
//! arrows move the palm.
//!
//! ## Command line
//!
//! | Flag | Effect |
//! |---|---|
//! | `--photos <DIR>` | hang every image in `DIR` on the tree |
//! | `--foliage <N>` | particle count (default 4000) |
//! | `--replay <FILE>` | drive gestures from a JSON-lines recording |
//! | `--record <FILE>` | save observed landmarks on exit |
//! | `--no-gesture` | toggle only |
//! | `--seed <N>` | deterministic scatter |
//! | `--threshold <N>` | gesture debounce frames |

pub mod error;
pub mod config;
pub mod camera;
pub mod sim;
pub mod photos;
pub mod visualizer;
pub mod app;

pub use app::{run, AppState};
pub use config::{AppConfig, Cli, GestureInput};
pub use error::SceneError;
