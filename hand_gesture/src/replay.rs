//! Recorded landmark streams.
//!
//! A recording is JSON lines: each line is either a 21-element array of
//! `{"x", "y", "z"}` objects or `null` for a frame without a hand.  Blank
//! lines are ignored.
//!
//! [`ReplayRecording::split`] turns a recording into a camera/detector pair
//! so it can stand in for live input anywhere a [`FrameSource`] and a
//! [`LandmarkDetector`] are accepted.

use std::io::{BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::detector::{FrameSource, LandmarkDetector, VideoFrame};
use crate::error::GestureError;
use crate::landmarks::HandLandmarks;

/// 60 fps.
pub const DEFAULT_INTERVAL: Duration = Duration::from_micros(16_667);

#[derive(Clone, Debug, PartialEq)]
pub struct ReplayRecording {
    frames:   Vec<Option<HandLandmarks>>,
    interval: Duration,
}

impl Default for ReplayRecording {
    fn default() -> Self { ReplayRecording::new(DEFAULT_INTERVAL) }
}

impl ReplayRecording {
    pub fn new(interval: Duration) -> Self {
        ReplayRecording { frames: Vec::new(), interval }
    }

    /// Parse JSON lines.  Errors carry the 1-based line number.
    pub fn from_reader<R: BufRead>(reader: R, interval: Duration) -> Result<Self, GestureError> {
        let mut frames = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let frame: Option<HandLandmarks> = serde_json::from_str(line)
                .map_err(|source| GestureError::Replay { line: i + 1, source })?;
            frames.push(frame);
        }
        log::debug!("loaded replay with {} frames", frames.len());
        Ok(ReplayRecording { frames, interval })
    }

    pub fn write_jsonl<W: Write>(&self, mut out: W) -> Result<(), GestureError> {
        for frame in &self.frames {
            serde_json::to_writer(&mut out, frame)?;
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn push(&mut self, frame: Option<HandLandmarks>) { self.frames.push(frame); }

    pub fn frames(&self)   -> &[Option<HandLandmarks>] { &self.frames }
    pub fn interval(&self) -> Duration                 { self.interval }
    pub fn len(&self)      -> usize                    { self.frames.len() }
    pub fn is_empty(&self) -> bool                     { self.frames.is_empty() }

    /// Camera and detector sharing this recording.  With `paced` the camera
    /// sleeps one interval per frame; otherwise it runs flat out.
    pub fn split(self, paced: bool) -> (ReplayCamera, ReplayDetector) {
        let count = self.frames.len() as u64;
        let frames = Arc::new(self.frames);
        (
            ReplayCamera { count, next: 0, interval: self.interval, paced },
            ReplayDetector { frames },
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// ReplayCamera / ReplayDetector
// ════════════════════════════════════════════════════════════════════════════

/// Emits one blank frame per recorded entry.
#[derive(Debug)]
pub struct ReplayCamera {
    count:    u64,
    next:     u64,
    interval: Duration,
    paced:    bool,
}

impl FrameSource for ReplayCamera {
    fn open(&mut self) -> Result<(), GestureError> { Ok(()) }

    fn next_frame(&mut self) -> Option<VideoFrame> {
        if self.next >= self.count {
            return None;
        }
        if self.paced {
            thread::sleep(self.interval);
        }
        let seq = self.next;
        self.next += 1;
        let timestamp = self.interval.saturating_mul(seq as u32);
        Some(VideoFrame::blank(seq, timestamp))
    }
}

/// Looks the frame's sequence number up in the recording.
#[derive(Clone, Debug)]
pub struct ReplayDetector {
    frames: Arc<Vec<Option<HandLandmarks>>>,
}

impl LandmarkDetector for ReplayDetector {
    fn load(&mut self) -> Result<(), GestureError> {
        if self.frames.is_empty() {
            return Err(GestureError::DetectorUnavailable("replay has no frames".into()));
        }
        Ok(())
    }

    fn detect(&mut self, frame: &VideoFrame, _timestamp: Duration) -> Option<HandLandmarks> {
        self.frames.get(frame.sequence as usize).cloned().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, LANDMARK_COUNT};

    fn hand(x: f32) -> HandLandmarks {
        HandLandmarks::new([Landmark::new(x, 0.5, 0.0); LANDMARK_COUNT])
    }

    #[test]
    fn parses_hands_nulls_and_blank_lines() {
        let row = serde_json::to_string(&hand(0.25)).unwrap();
        let text = format!("{row}\nnull\n\n{row}\n");
        let rec = ReplayRecording::from_reader(text.as_bytes(), DEFAULT_INTERVAL).unwrap();
        assert_eq!(rec.len(), 3);
        assert!(rec.frames()[0].is_some());
        assert!(rec.frames()[1].is_none());
    }

    #[test]
    fn bad_line_reports_line_number() {
        let row = serde_json::to_string(&hand(0.25)).unwrap();
        let text = format!("{row}\nnull\n[1, 2]\n");
        let err = ReplayRecording::from_reader(text.as_bytes(), DEFAULT_INTERVAL).unwrap_err();
        assert!(matches!(err, GestureError::Replay { line: 3, .. }), "{err:?}");
    }

    #[test]
    fn write_then_read_preserves_gaps() {
        let mut rec = ReplayRecording::default();
        rec.push(Some(hand(0.1)));
        rec.push(None);
        rec.push(Some(hand(0.9)));
        let mut buf = Vec::new();
        rec.write_jsonl(&mut buf).unwrap();
        assert_eq!(String::from_utf8_lossy(&buf).lines().nth(1), Some("null"));
        let back = ReplayRecording::from_reader(buf.as_slice(), DEFAULT_INTERVAL).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn split_pair_replays_in_order() {
        let mut rec = ReplayRecording::new(Duration::from_millis(10));
        rec.push(Some(hand(0.1)));
        rec.push(None);
        let (mut cam, mut det) = rec.split(false);
        det.load().unwrap();

        let f0 = cam.next_frame().unwrap();
        let f1 = cam.next_frame().unwrap();
        assert!(cam.next_frame().is_none());
        assert_eq!(f1.timestamp, Duration::from_millis(10));
        assert_eq!(det.detect(&f0, f0.timestamp).map(|h| h[0].x), Some(0.1));
        assert!(det.detect(&f1, f1.timestamp).is_none());
    }

    #[test]
    fn empty_replay_is_unavailable() {
        let (_, mut det) = ReplayRecording::default().split(false);
        assert!(matches!(det.load(), Err(GestureError::DetectorUnavailable(_))));
    }
}
