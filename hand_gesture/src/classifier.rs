//! Per-frame gesture classification and debouncing.
//!
//! # Algorithm
//!
//! Each frame with a hand:
//!
//! * a finger is **extended** when its tip is further from the wrist than
//!   `ratio ×` its base (1.5 for fingers, 1.2 for the thumb), measured in the
//!   image plane;
//! * ≥ 4 extended → OPEN, ≤ 1 → CLOSED, otherwise AMBIGUOUS;
//! * a matching vote bumps its counter and zeroes the other one, an
//!   ambiguous vote zeroes both;
//! * when a counter steps past `confidence_threshold` the mapped mode is
//!   committed through the [`ModeSwitch`] (OPEN → Chaos, CLOSED → Formed).
//!
//! Frames without a hand only decay the counters, so a one-frame dropout
//! does not lose progress.

use std::fmt;

use tree_motion::{ModeChange, ModeSource, ModeSwitch, TreeMode};

use crate::landmarks::{HandLandmarks, Landmark, FINGERS, THUMB, WRIST};

// ════════════════════════════════════════════════════════════════════════════
// Config
// ════════════════════════════════════════════════════════════════════════════

/// Tunables.  Empirical; no calibration is attempted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierConfig {
    /// Consecutive votes that must be *exceeded* before a commit.
    pub confidence_threshold: u32,
    /// Tip/base distance ratio for index…pinky.
    pub finger_ratio: f32,
    /// Tip/base distance ratio for the thumb, which has less reach.
    pub thumb_ratio:  f32,
    /// Extended count at or above which the hand is OPEN.
    pub open_min:     u8,
    /// Extended count at or below which the hand is CLOSED.
    pub closed_max:   u8,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        ClassifierConfig {
            confidence_threshold: 5,
            finger_ratio:         1.5,
            thumb_ratio:          1.2,
            open_min:             4,
            closed_max:           1,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Outputs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vote {
    Open,
    Closed,
    Ambiguous,
    /// No hand in this frame.
    NoHand,
}

/// Normalised palm position for camera control.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPosition {
    pub x:        f32,
    pub y:        f32,
    pub detected: bool,
}

impl HandPosition {
    /// "Unknown": centred, flagged as not detected.
    pub fn absent() -> Self {
        HandPosition { x: 0.5, y: 0.5, detected: false }
    }
}

impl Default for HandPosition {
    fn default() -> Self { HandPosition::absent() }
}

/// Human-readable state of the gesture subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStatus {
    Initializing,
    WaitingForHand,
    NoHand,
    Open,
    Closed,
    Ambiguous,
    Unavailable,
    PermissionDenied,
    Stopped,
}

impl fmt::Display for GestureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GestureStatus::Initializing     => "Initializing...",
            GestureStatus::WaitingForHand   => "Waiting for hand...",
            GestureStatus::NoHand           => "No hand detected",
            GestureStatus::Open             => "Detected: OPEN (Unleash)",
            GestureStatus::Closed           => "Detected: CLOSED (Restore)",
            GestureStatus::Ambiguous        => "Detected: ...",
            GestureStatus::Unavailable      => "Gesture control unavailable",
            GestureStatus::PermissionDenied => "Permission Denied",
            GestureStatus::Stopped          => "Gesture control stopped",
        })
    }
}

/// Everything one observed frame produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureOutput {
    pub vote:        Vote,
    /// Extended finger count, when a hand was present.
    pub extended:    Option<u8>,
    pub hand:        HandPosition,
    /// Set only on the frame a transition is committed.
    pub mode_change: Option<ModeChange>,
    pub status:      GestureStatus,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureState: the debounce counters
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GestureState {
    open_frames:   u32,
    closed_frames: u32,
}

impl GestureState {
    pub fn open_frames(&self)   -> u32 { self.open_frames }
    pub fn closed_frames(&self) -> u32 { self.closed_frames }

    fn decay(&mut self) {
        self.open_frames = self.open_frames.saturating_sub(1);
        self.closed_frames = self.closed_frames.saturating_sub(1);
    }

    fn record(&mut self, vote: Vote) {
        match vote {
            Vote::Open => {
                self.open_frames = self.open_frames.saturating_add(1);
                self.closed_frames = 0;
            }
            Vote::Closed => {
                self.closed_frames = self.closed_frames.saturating_add(1);
                self.open_frames = 0;
            }
            Vote::Ambiguous => *self = GestureState::default(),
            Vote::NoHand    => self.decay(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger tests
// ════════════════════════════════════════════════════════════════════════════

/// Strictly further than `ratio ×` the base distance.
pub fn is_extended(wrist: &Landmark, tip: &Landmark, base: &Landmark, ratio: f32) -> bool {
    wrist.planar_distance(tip) > wrist.planar_distance(base) * ratio
}

/// Number of extended digits, thumb included (0–5).
pub fn extended_count(hand: &HandLandmarks, config: &ClassifierConfig) -> u8 {
    let wrist = &hand[WRIST];
    let fingers = FINGERS
        .iter()
        .filter(|&&(tip, base)| is_extended(wrist, &hand[tip], &hand[base], config.finger_ratio))
        .count() as u8;
    let thumb = is_extended(wrist, &hand[THUMB.0], &hand[THUMB.1], config.thumb_ratio) as u8;
    fingers + thumb
}

// ════════════════════════════════════════════════════════════════════════════
// GestureClassifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, Default)]
pub struct GestureClassifier {
    config: ClassifierConfig,
    state:  GestureState,
}

impl GestureClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        GestureClassifier { config, state: GestureState::default() }
    }

    pub fn config(&self) -> &ClassifierConfig { &self.config }
    pub fn state(&self)  -> &GestureState     { &self.state }

    pub fn vote_for(&self, extended: u8) -> Vote {
        if extended >= self.config.open_min {
            Vote::Open
        } else if extended <= self.config.closed_max {
            Vote::Closed
        } else {
            Vote::Ambiguous
        }
    }

    /// Feed one frame.  `mode` is the scene's single mode state; a confirmed
    /// gesture commits through it, and it is what decides whether a commit
    /// is redundant.
    pub fn observe(
        &mut self,
        landmarks: Option<&HandLandmarks>,
        mode: &mut ModeSwitch,
    ) -> GestureOutput {
        let Some(hand) = landmarks else {
            self.state.record(Vote::NoHand);
            return GestureOutput {
                vote:        Vote::NoHand,
                extended:    None,
                hand:        HandPosition::absent(),
                mode_change: None,
                status:      GestureStatus::NoHand,
            };
        };

        let (x, y) = hand.palm_center();
        let extended = extended_count(hand, &self.config);
        let vote = self.vote_for(extended);
        self.state.record(vote);

        // Commit on the frame the counter steps past the threshold only.
        let crossing = self.config.confidence_threshold.saturating_add(1);
        let (target, status) = match vote {
            Vote::Open   => ((self.state.open_frames == crossing).then_some(TreeMode::Chaos), GestureStatus::Open),
            Vote::Closed => ((self.state.closed_frames == crossing).then_some(TreeMode::Formed), GestureStatus::Closed),
            _            => (None, GestureStatus::Ambiguous),
        };
        let mode_change = target.and_then(|m| mode.set(m, ModeSource::Gesture));
        if let Some(change) = mode_change {
            log::debug!("gesture {:?} confirmed -> {}", vote, change.mode);
        }

        GestureOutput {
            vote,
            extended: Some(extended),
            hand: HandPosition { x, y, detected: true },
            mode_change,
            status,
        }
    }

    /// Forget accumulated votes.
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
