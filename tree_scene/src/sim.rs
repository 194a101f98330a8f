//! Keyboard hand simulator.
//!
//! Stands in for a webcam and landmark model.  The visualizer sends
//! [`SimInput`]s from key presses; [`SimHand`] turns the current pose into a
//! synthetic 21-point hand with a little positional jitter, so the real
//! classifier has something noisy to debounce.
//!
//! | Key | Input |
//! |---|---|
//! | `O` | open hand |
//! | `F` | fist |
//! | `3` | three fingers (ambiguous) |
//! | `H` | hand leaves the frame |
//! | arrows | move the hand |

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use hand_gesture::{
    FrameSource, GestureError, HandLandmarks, Landmark, LandmarkDetector, VideoFrame,
    LANDMARK_COUNT,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ════════════════════════════════════════════════════════════════════════════
// Inputs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    Open,
    Fist,
    /// Thumb and pinky curled.
    Three,
    Hidden,
}

/// Raw input event from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    Pose(SimPose),
    /// Shift the palm, in normalised image units.
    Move { dx: f32, dy: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub fps:    u32,
    /// Max per-coordinate noise added to every landmark.
    pub jitter: f32,
    /// Palm movement per arrow-key repeat.
    pub step:   f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig { fps: 30, jitter: 0.004, step: 0.02 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimCamera
// ════════════════════════════════════════════════════════════════════════════

/// Paced source of empty frames.
pub struct SimCamera {
    interval: Duration,
    started:  Option<Instant>,
    sequence: u64,
}

impl SimCamera {
    pub fn new(cfg: &SimConfig) -> Self {
        SimCamera {
            interval: Duration::from_secs(1) / cfg.fps.max(1),
            started:  None,
            sequence: 0,
        }
    }
}

impl FrameSource for SimCamera {
    fn open(&mut self) -> Result<(), GestureError> {
        self.started = Some(Instant::now());
        Ok(())
    }

    fn next_frame(&mut self) -> Option<VideoFrame> {
        let started = self.started?;
        thread::sleep(self.interval);
        let frame = VideoFrame::blank(self.sequence, started.elapsed());
        self.sequence += 1;
        Some(frame)
    }

    fn close(&mut self) {
        self.started = None;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimHand
// ════════════════════════════════════════════════════════════════════════════

/// Synthetic landmark "model" driven by [`SimInput`]s.
pub struct SimHand {
    rx:     Receiver<SimInput>,
    pose:   SimPose,
    palm:   Vec2,
    cfg:    SimConfig,
    rng:    StdRng,
}

impl SimHand {
    pub fn new(rx: Receiver<SimInput>, cfg: SimConfig) -> Self {
        SimHand {
            rx,
            pose: SimPose::Hidden,
            palm: Vec2::splat(0.5),
            cfg,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn pose(&self) -> SimPose { self.pose }
    pub fn palm(&self) -> Vec2    { self.palm }

    fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pose(p) => self.pose = p,
            SimInput::Move { dx, dy } => {
                self.palm = (self.palm + Vec2::new(dx, dy)).clamp(Vec2::splat(0.2), Vec2::splat(0.8));
            }
        }
    }
}

impl LandmarkDetector for SimHand {
    fn load(&mut self) -> Result<(), GestureError> { Ok(()) }

    fn detect(&mut self, _frame: &VideoFrame, _timestamp: Duration) -> Option<HandLandmarks> {
        while let Ok(input) = self.rx.try_recv() {
            self.apply(input);
        }
        pose_landmarks(self.pose, self.palm, self.cfg.jitter, &mut self.rng)
    }
}

// ── hand geometry ───────────────────────────────────────────────────────────

/// Digit directions, radians from straight up: thumb, index…pinky.
const DIGIT_ANGLES: [f32; 5] = [-0.95, -0.3, -0.1, 0.1, 0.3];

/// Wrist-relative joint distances, four joints per digit.
const THUMB_OPEN:   [f32; 4] = [0.04, 0.07, 0.10, 0.13];
const THUMB_CURLED: [f32; 4] = [0.04, 0.07, 0.065, 0.055];
const FINGER_OPEN:  [f32; 4] = [0.09, 0.13, 0.16, 0.19];
const FINGER_CURLED:[f32; 4] = [0.09, 0.11, 0.09, 0.07];

/// Palm sits this far above the wrist.
const WRIST_DROP: f32 = 0.07;

/// Landmarks for `pose` around `palm`; `None` for [`SimPose::Hidden`].
pub fn pose_landmarks<R: Rng + ?Sized>(
    pose: SimPose,
    palm: Vec2,
    jitter: f32,
    rng: &mut R,
) -> Option<HandLandmarks> {
    let extended = match pose {
        SimPose::Open   => [true; 5],
        SimPose::Fist   => [false; 5],
        SimPose::Three  => [false, true, true, true, false],
        SimPose::Hidden => return None,
    };

    let wrist = palm + Vec2::new(0.0, WRIST_DROP);
    let mut points = [Vec2::ZERO; LANDMARK_COUNT];
    points[0] = wrist;
    for (k, &angle) in DIGIT_ANGLES.iter().enumerate() {
        // Image y grows downward.
        let dir = Vec2::new(angle.sin(), -angle.cos());
        let reach = match (k, extended[k]) {
            (0, true)  => &THUMB_OPEN,
            (0, false) => &THUMB_CURLED,
            (_, true)  => &FINGER_OPEN,
            (_, false) => &FINGER_CURLED,
        };
        for (j, &d) in reach.iter().enumerate() {
            points[1 + 4 * k + j] = wrist + dir * d;
        }
    }

    let mut noise = || if jitter > 0.0 { rng.gen_range(-jitter..jitter) } else { 0.0 };
    let landmarks = points.map(|p| Landmark::new(p.x + noise(), p.y + noise(), 0.0));
    Some(HandLandmarks::new(landmarks))
}
