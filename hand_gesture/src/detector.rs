//! Capabilities the gesture pipeline is built on.
//!
//! Neither the camera nor the landmark model lives in this crate.  A
//! [`FrameSource`] yields frames, a [`LandmarkDetector`] turns one frame into
//! at most one hand.  Both run on the session's worker thread, hence `Send`.

use std::time::Duration;

use crate::classifier::GestureStatus;
use crate::error::GestureError;
use crate::landmarks::HandLandmarks;

// ════════════════════════════════════════════════════════════════════════════
// VideoFrame
// ════════════════════════════════════════════════════════════════════════════

/// One captured frame.  `pixels` is packed RGB and may be empty for sources
/// that do not carry image data (replays, simulators).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoFrame {
    pub width:     u32,
    pub height:    u32,
    /// Monotonic per source, starting at 0.
    pub sequence:  u64,
    /// Capture time relative to the source being opened.
    pub timestamp: Duration,
    pub pixels:    Vec<u8>,
}

impl VideoFrame {
    /// A frame with no pixel data, for synthetic sources.
    pub fn blank(sequence: u64, timestamp: Duration) -> Self {
        VideoFrame { width: 0, height: 0, sequence, timestamp, pixels: Vec::new() }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Traits
// ════════════════════════════════════════════════════════════════════════════

/// Camera-like source of frames.
pub trait FrameSource: Send + 'static {
    /// Acquire the device.  [`GestureError::PermissionDenied`] is reported
    /// separately from other failures.
    fn open(&mut self) -> Result<(), GestureError>;

    /// Block until the next frame.  `None` once the source is exhausted.
    fn next_frame(&mut self) -> Option<VideoFrame>;

    /// Release the device.  Called exactly once, after `open` succeeded.
    fn close(&mut self) {}
}

/// External hand-landmark model, configured for at most one hand.
pub trait LandmarkDetector: Send + 'static {
    /// Load the model.  Called once before any `detect`.
    fn load(&mut self) -> Result<(), GestureError>;

    fn detect(&mut self, frame: &VideoFrame, timestamp: Duration) -> Option<HandLandmarks>;

    fn close(&mut self) {}
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorStatus
// ════════════════════════════════════════════════════════════════════════════

/// Lifecycle of the worker, reported over the session channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetectorStatus {
    Initializing,
    /// Model loaded and camera streaming.
    Ready,
    Unavailable(String),
    PermissionDenied,
    Stopped,
}

impl DetectorStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DetectorStatus::Unavailable(_) | DetectorStatus::PermissionDenied | DetectorStatus::Stopped
        )
    }
}

impl From<&DetectorStatus> for GestureStatus {
    fn from(s: &DetectorStatus) -> Self {
        match s {
            DetectorStatus::Initializing     => GestureStatus::Initializing,
            DetectorStatus::Ready            => GestureStatus::WaitingForHand,
            DetectorStatus::Unavailable(_)   => GestureStatus::Unavailable,
            DetectorStatus::PermissionDenied => GestureStatus::PermissionDenied,
            DetectorStatus::Stopped          => GestureStatus::Stopped,
        }
    }
}
