//! The detector worker thread.
//!
//! [`GestureSession::start`] moves a [`FrameSource`] and a
//! [`LandmarkDetector`] onto their own thread and hands back the receiving
//! end of a channel of [`DetectorMessage`]s.  The owner polls it once per
//! render frame with [`GestureSession::drain`].
//!
//! After [`GestureSession::stop`] nothing more is delivered, even messages
//! the worker had already queued.  `stop` waits at most [`STOP_TIMEOUT`]
//! for the worker; a source stuck inside `next_frame` is detached and its
//! late results are dropped with the channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::detector::{DetectorStatus, FrameSource, LandmarkDetector};
use crate::error::GestureError;
use crate::landmarks::HandLandmarks;

/// Longest `stop` blocks waiting for the worker to exit.
pub const STOP_TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq)]
pub enum DetectorMessage {
    Status(DetectorStatus),
    /// Result for one processed frame; `None` when no hand was found.
    Frame {
        timestamp: Duration,
        landmarks: Option<HandLandmarks>,
    },
}

// ════════════════════════════════════════════════════════════════════════════
// GestureSession
// ════════════════════════════════════════════════════════════════════════════

pub struct GestureSession {
    rx:      Receiver<DetectorMessage>,
    stop:    Arc<AtomicBool>,
    handle:  Option<JoinHandle<()>>,
    stopped: bool,
}

impl GestureSession {
    /// Spawn the worker.  The first message is always
    /// `Status(Initializing)`.
    pub fn start<S, D>(source: S, detector: D) -> Self
    where
        S: FrameSource,
        D: LandmarkDetector,
    {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("gesture-detector".into())
            .spawn(move || worker(source, detector, tx, flag));

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                log::warn!("could not spawn detector thread: {}", e);
                None
            }
        };
        GestureSession { rx, stop, handle, stopped: false }
    }

    /// Everything received since the last call (non-blocking).
    pub fn drain(&self) -> Vec<DetectorMessage> {
        if self.stopped {
            return Vec::new();
        }
        self.rx.try_iter().collect()
    }

    /// Wait up to `timeout` for one message.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<DetectorMessage> {
        if self.stopped {
            return None;
        }
        match self.rx.recv_timeout(timeout) {
            Ok(m) => Some(m),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Halt the worker, release camera and detector, and discard anything
    /// still queued.  Idempotent.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.stop.store(true, Ordering::Relaxed);
        if let Some(h) = self.handle.take() {
            let deadline = Instant::now() + STOP_TIMEOUT;
            while !h.is_finished() && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(5));
            }
            if !h.is_finished() {
                log::warn!("detector thread did not exit within {:?}; detaching it", STOP_TIMEOUT);
            } else if h.join().is_err() {
                log::warn!("detector thread panicked");
            }
        }
        let discarded = self.rx.try_iter().count();
        log::debug!("gesture session stopped ({} queued messages discarded)", discarded);
    }
}

impl Drop for GestureSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// worker: the thread body
// ════════════════════════════════════════════════════════════════════════════

fn worker<S, D>(mut source: S, mut detector: D, tx: Sender<DetectorMessage>, stop: Arc<AtomicBool>)
where
    S: FrameSource,
    D: LandmarkDetector,
{
    let status = |s: DetectorStatus| {
        let _ = tx.send(DetectorMessage::Status(s));
    };
    status(DetectorStatus::Initializing);

    if let Err(e) = detector.load() {
        log::warn!("gesture detector failed to load: {}", e);
        status(DetectorStatus::Unavailable(e.to_string()));
        return;
    }

    if let Err(e) = source.open() {
        detector.close();
        match e {
            GestureError::PermissionDenied => {
                log::warn!("camera permission denied");
                status(DetectorStatus::PermissionDenied);
            }
            other => {
                log::warn!("camera failed to open: {}", other);
                status(DetectorStatus::Unavailable(other.to_string()));
            }
        }
        return;
    }

    log::info!("gesture detector ready");
    status(DetectorStatus::Ready);

    let mut last_timestamp = None;
    let mut processed = 0u64;
    while !stop.load(Ordering::Relaxed) {
        let Some(frame) = source.next_frame() else { break };
        // A camera may hand back the same frame twice.
        if last_timestamp == Some(frame.timestamp) {
            continue;
        }
        last_timestamp = Some(frame.timestamp);

        let landmarks = detector.detect(&frame, frame.timestamp);
        processed += 1;
        let msg = DetectorMessage::Frame { timestamp: frame.timestamp, landmarks };
        if tx.send(msg).is_err() {
            break;
        }
    }

    source.close();
    detector.close();
    log::debug!("detector worker exiting after {} frames", processed);
    status(DetectorStatus::Stopped);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::VideoFrame;
    use crate::landmarks::{Landmark, LANDMARK_COUNT};
    use std::sync::atomic::AtomicUsize;

    const WAIT: Duration = Duration::from_secs(2);

    /// Yields `count` frames at the given timestamps (ms), then ends.
    struct Scripted {
        stamps:  Vec<u64>,
        next:    usize,
        open:    Result<(), fn() -> GestureError>,
        closed:  Arc<AtomicUsize>,
        delay:   Duration,
        endless: bool,
    }

    impl Scripted {
        fn new(stamps: Vec<u64>) -> Self {
            Scripted {
                stamps,
                next: 0,
                open: Ok(()),
                closed: Arc::new(AtomicUsize::new(0)),
                delay: Duration::ZERO,
                endless: false,
            }
        }
    }

    impl FrameSource for Scripted {
        fn open(&mut self) -> Result<(), GestureError> {
            self.open.map_err(|f| f())
        }
        fn next_frame(&mut self) -> Option<VideoFrame> {
            thread::sleep(self.delay);
            let ms = if self.endless {
                self.next as u64
            } else {
                *self.stamps.get(self.next)?
            };
            let frame = VideoFrame::blank(self.next as u64, Duration::from_millis(ms));
            self.next += 1;
            Some(frame)
        }
        fn close(&mut self) {
            self.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Reports a hand on even sequence numbers.
    struct EveryOther {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl LandmarkDetector for EveryOther {
        fn load(&mut self) -> Result<(), GestureError> {
            if self.fail {
                Err(GestureError::DetectorUnavailable("model asset missing".into()))
            } else {
                Ok(())
            }
        }
        fn detect(&mut self, frame: &VideoFrame, _: Duration) -> Option<HandLandmarks> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (frame.sequence % 2 == 0)
                .then(|| HandLandmarks::new([Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT]))
        }
    }

    fn detector() -> EveryOther {
        EveryOther { fail: false, calls: Arc::new(AtomicUsize::new(0)) }
    }

    fn collect(session: &GestureSession) -> Vec<DetectorMessage> {
        let mut out = Vec::new();
        while let Some(m) = session.recv_timeout(WAIT) {
            let done = matches!(&m, DetectorMessage::Status(s) if s.is_terminal());
            out.push(m);
            if done { break; }
        }
        out
    }

    #[test]
    fn streams_frames_between_ready_and_stopped() {
        let source = Scripted::new(vec![0, 33, 66]);
        let closed = Arc::clone(&source.closed);
        let session = GestureSession::start(source, detector());
        let msgs = collect(&session);

        assert_eq!(msgs[0], DetectorMessage::Status(DetectorStatus::Initializing));
        assert_eq!(msgs[1], DetectorMessage::Status(DetectorStatus::Ready));
        let hands: Vec<bool> = msgs.iter().filter_map(|m| match m {
            DetectorMessage::Frame { landmarks, .. } => Some(landmarks.is_some()),
            _ => None,
        }).collect();
        assert_eq!(hands, vec![true, false, true]);
        assert_eq!(msgs.last(), Some(&DetectorMessage::Status(DetectorStatus::Stopped)));
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn repeated_timestamp_is_skipped() {
        let det = detector();
        let calls = Arc::clone(&det.calls);
        let session = GestureSession::start(Scripted::new(vec![0, 0, 16, 16, 32]), det);
        let frames = collect(&session)
            .into_iter()
            .filter(|m| matches!(m, DetectorMessage::Frame { .. }))
            .count();
        assert_eq!(frames, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn load_failure_reports_unavailable() {
        let det = EveryOther { fail: true, calls: Arc::new(AtomicUsize::new(0)) };
        let session = GestureSession::start(Scripted::new(vec![0]), det);
        let msgs = collect(&session);
        assert!(matches!(
            msgs.last(),
            Some(DetectorMessage::Status(DetectorStatus::Unavailable(m))) if m.contains("model asset")
        ));
        assert!(!msgs.iter().any(|m| matches!(m, DetectorMessage::Frame { .. })));
    }

    #[test]
    fn permission_denied_is_distinct() {
        let mut source = Scripted::new(vec![0]);
        source.open = Err(|| GestureError::PermissionDenied);
        let session = GestureSession::start(source, detector());
        let msgs = collect(&session);
        assert_eq!(msgs.last(), Some(&DetectorMessage::Status(DetectorStatus::PermissionDenied)));
    }

    #[test]
    fn other_camera_failure_is_unavailable() {
        let mut source = Scripted::new(vec![0]);
        source.open = Err(|| GestureError::CameraUnavailable("busy".into()));
        let session = GestureSession::start(source, detector());
        let msgs = collect(&session);
        assert!(matches!(
            msgs.last(),
            Some(DetectorMessage::Status(DetectorStatus::Unavailable(_)))
        ));
    }

    #[test]
    fn stop_halts_endless_source_and_discards_queue() {
        let mut source = Scripted::new(Vec::new());
        source.endless = true;
        source.delay = Duration::from_millis(1);
        let closed = Arc::clone(&source.closed);
        let mut session = GestureSession::start(source, detector());

        // Wait until frames are flowing.
        while let Some(m) = session.recv_timeout(WAIT) {
            if matches!(m, DetectorMessage::Frame { .. }) { break; }
        }
        thread::sleep(Duration::from_millis(20));

        session.stop();
        assert!(session.drain().is_empty());
        assert!(session.recv_timeout(Duration::from_millis(10)).is_none());
        assert_eq!(closed.load(Ordering::SeqCst), 1);

        session.stop();
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    /// Blocks in `next_frame` until the gate sender is dropped.
    struct Stalled {
        gate: mpsc::Receiver<()>,
    }

    impl FrameSource for Stalled {
        fn open(&mut self) -> Result<(), GestureError> { Ok(()) }
        fn next_frame(&mut self) -> Option<VideoFrame> {
            let _ = self.gate.recv();
            None
        }
        fn close(&mut self) {}
    }

    #[test]
    fn stop_does_not_hang_on_a_stalled_camera() {
        let (gate_tx, gate) = mpsc::channel();
        let mut session = GestureSession::start(Stalled { gate }, detector());
        while let Some(m) = session.recv_timeout(WAIT) {
            if m == DetectorMessage::Status(DetectorStatus::Ready) { break; }
        }

        let started = Instant::now();
        session.stop();
        let waited = started.elapsed();
        assert!(waited >= STOP_TIMEOUT, "{waited:?}");
        assert!(waited < STOP_TIMEOUT + WAIT, "{waited:?}");
        assert!(session.drain().is_empty());

        // Release the worker so it can finish on its own.
        drop(gate_tx);
    }
}
