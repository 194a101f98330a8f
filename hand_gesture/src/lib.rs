//! # hand_gesture
//!
//! Turns a noisy per-frame stream of hand landmarks into a stable
//! [`TreeMode`](tree_motion::TreeMode) signal and a palm position.
//!
//! ## Gesture → Action mapping
//!
//! | Gesture | Vote | Action (after 6 consecutive frames) |
//! |---|---|---|
//! | Open hand (≥ 4 fingers extended) | OPEN | commit `Chaos` ("unleash") |
//! | Fist (≤ 1 finger extended) | CLOSED | commit `Formed` ("restore") |
//! | Anything in between | AMBIGUOUS | reset both counters |
//! | No hand in frame | NONE | counters decay by one |
//!
//! Every frame also yields a [`HandPosition`]: the palm centre when a hand is
//! present, `(0.5, 0.5, detected = false)` otherwise.
//!
//! ## Threads
//!
//! Camera and detector are injected capabilities ([`FrameSource`],
//! [`LandmarkDetector`]).  [`GestureSession::start`] runs them on a worker
//! thread that only forwards raw [`DetectorMessage`]s; classification and the
//! mode switch stay on the caller's thread.

pub mod error;
pub mod landmarks;
pub mod classifier;
pub mod detector;
pub mod session;
pub mod replay;

pub use error::GestureError;
pub use landmarks::{HandLandmarks, Landmark, HAND_CONNECTIONS, LANDMARK_COUNT};
pub use classifier::{
    ClassifierConfig, GestureClassifier, GestureOutput, GestureState, GestureStatus,
    HandPosition, Vote,
};
pub use detector::{DetectorStatus, FrameSource, LandmarkDetector, VideoFrame};
pub use session::{DetectorMessage, GestureSession};
pub use replay::{ReplayCamera, ReplayDetector, ReplayRecording};
