//! Top-level application state machine.
//!
//! `AppState` owns the single [`ModeSwitch`], the gesture classifier, and
//! every animated part of the scene.  Detector messages, photo events and
//! window actions are fed in on the render thread; `tick` advances the
//! motion model once per frame.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use hand_gesture::replay::DEFAULT_INTERVAL;
use hand_gesture::{
    DetectorMessage, GestureClassifier, GestureSession, GestureStatus, HandLandmarks,
    HandPosition, ReplayRecording,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_motion::{
    FoliageField, ModeChange, ModeSource, ModeSwitch, OrnamentSet, Star, SyncReport,
    TextureState, TreeMode,
};

use crate::camera::CameraRig;
use crate::config::{AppConfig, GestureInput};
use crate::error::SceneError;
use crate::photos::{self, PhotoEvent, Thumbnail};
use crate::sim::{SimCamera, SimHand, SimInput};
use crate::visualizer::{SceneView, UiAction, Visualizer};

/// Longest step the motion model takes; a stalled frame does not teleport.
pub const MAX_DELTA: f32 = 0.1;

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

pub struct AppState {
    // ── mode ─────────────────────────────────────────────────────────────
    mode:       ModeSwitch,
    classifier: GestureClassifier,

    // ── scene ────────────────────────────────────────────────────────────
    foliage:    FoliageField,
    star:       Star,
    ornaments:  OrnamentSet,
    thumbnails: HashMap<String, Thumbnail>,
    camera:     CameraRig,
    time:       f32,
    rng:        StdRng,

    // ── gesture feedback ─────────────────────────────────────────────────
    status:     GestureStatus,
    hand:       HandPosition,
    landmarks:  Option<HandLandmarks>,
    recording:  Option<ReplayRecording>,
}

impl AppState {
    pub fn new(cfg: &AppConfig) -> Self {
        let mut rng = match cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let foliage = FoliageField::new(cfg.foliage_count, &mut rng);
        let star = Star::new(&mut rng);

        let status = match cfg.gesture {
            GestureInput::Disabled => GestureStatus::Unavailable,
            _                      => GestureStatus::Initializing,
        };

        AppState {
            mode:       ModeSwitch::new(cfg.initial_mode),
            classifier: GestureClassifier::new(cfg.classifier),
            foliage,
            star,
            ornaments:  OrnamentSet::new(),
            thumbnails: HashMap::new(),
            camera:     CameraRig::new(),
            time:       0.0,
            rng,
            status,
            hand:       HandPosition::absent(),
            landmarks:  None,
            recording:  cfg.record.as_ref().map(|_| ReplayRecording::default()),
        }
    }

    // ── inputs ───────────────────────────────────────────────────────────

    /// Window action.  Only `ToggleMode` affects the state.
    pub fn handle_action(&mut self, action: UiAction) -> Option<ModeChange> {
        match action {
            UiAction::ToggleMode => Some(self.mode.toggle(ModeSource::Toggle)),
            UiAction::ReloadPhotos | UiAction::Quit => None,
        }
    }

    /// One message from the detector worker.
    pub fn handle_detector(&mut self, msg: DetectorMessage) -> Option<ModeChange> {
        match msg {
            DetectorMessage::Status(s) => {
                self.status = GestureStatus::from(&s);
                if s.is_terminal() {
                    self.hand = HandPosition::absent();
                    self.landmarks = None;
                    self.classifier.reset();
                }
                None
            }
            DetectorMessage::Frame { landmarks, .. } => {
                if let Some(rec) = &mut self.recording {
                    rec.push(landmarks.clone());
                }
                let out = self.classifier.observe(landmarks.as_ref(), &mut self.mode);
                self.status = out.status;
                self.hand = out.hand;
                self.landmarks = landmarks;
                out.mode_change
            }
        }
    }

    /// Replace the photo list.  Ornaments for surviving keys keep their
    /// motion state and picture.
    pub fn set_photos(&mut self, keys: &[String]) -> SyncReport {
        let report = self.ornaments.sync(keys, &mut self.rng);
        self.thumbnails.retain(|k, _| keys.contains(k));
        log::info!(
            "photos: {} new, {} kept, {} removed",
            report.created, report.kept, report.removed
        );
        report
    }

    pub fn handle_photo(&mut self, event: PhotoEvent) {
        match event {
            PhotoEvent::Loaded { key, thumbnail } => {
                if self.ornaments.set_texture(&key, TextureState::Loaded) {
                    self.thumbnails.insert(key, thumbnail);
                }
            }
            PhotoEvent::Failed { key, reason } => {
                log::debug!("{}: {}", key, reason);
                self.ornaments.set_texture(&key, TextureState::Missing);
                self.thumbnails.remove(&key);
            }
        }
    }

    /// No landmark backend is running; only the toggle drives the mode.
    pub fn gesture_unavailable(&mut self) {
        self.status = GestureStatus::Unavailable;
        self.hand = HandPosition::absent();
        self.landmarks = None;
        self.classifier.reset();
    }

    // ── per-frame tick ───────────────────────────────────────────────────

    pub fn tick(&mut self, delta: f32) {
        let delta = delta.clamp(0.0, MAX_DELTA);
        self.time += delta;
        let mode = self.mode.mode();
        self.foliage.tick(mode, delta);
        self.star.update(mode, delta, self.time);
        self.ornaments.update(mode, delta, self.time);
        self.camera.update(&self.hand, delta);
    }

    // ── accessors for the render loop ────────────────────────────────────

    pub fn mode(&self)       -> TreeMode                { self.mode.mode() }
    pub fn mode_switch(&self) -> &ModeSwitch            { &self.mode }
    pub fn classifier(&self) -> &GestureClassifier      { &self.classifier }
    pub fn status(&self)     -> GestureStatus           { self.status }
    pub fn hand(&self)       -> HandPosition            { self.hand }
    pub fn landmarks(&self)  -> Option<&HandLandmarks>  { self.landmarks.as_ref() }
    pub fn foliage(&self)    -> &FoliageField           { &self.foliage }
    pub fn star(&self)       -> &Star                   { &self.star }
    pub fn ornaments(&self)  -> &OrnamentSet            { &self.ornaments }
    pub fn camera(&self)     -> &CameraRig              { &self.camera }
    pub fn time(&self)       -> f32                     { self.time }

    pub fn thumbnail(&self, key: &str) -> Option<&Thumbnail> { self.thumbnails.get(key) }

    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            time:       self.time,
            mode:       self.mode.mode(),
            status:     self.status,
            foliage:    &self.foliage,
            star:       &self.star,
            ornaments:  &self.ornaments,
            thumbnails: &self.thumbnails,
            camera:     &self.camera,
            landmarks:  self.landmarks.as_ref(),
        }
    }

    pub fn take_recording(&mut self) -> Option<ReplayRecording> {
        self.recording.take()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

fn load_replay(path: &Path) -> Result<ReplayRecording, SceneError> {
    let file = File::open(path)?;
    Ok(ReplayRecording::from_reader(BufReader::new(file), DEFAULT_INTERVAL)?)
}

/// Start the configured landmark backend.  Returns the simulator's input
/// channel when the keyboard hand is in use.  A replay that cannot be read
/// leaves gesture control off; the scene still runs on the toggle.
fn start_gesture(cfg: &AppConfig) -> (Option<Sender<SimInput>>, Option<GestureSession>) {
    match &cfg.gesture {
        GestureInput::Simulated => {
            let (tx, rx) = mpsc::channel();
            let mut hand = SimHand::new(rx, cfg.sim);
            if let Some(seed) = cfg.seed {
                hand = hand.with_rng(StdRng::seed_from_u64(seed));
            }
            let session = GestureSession::start(SimCamera::new(&cfg.sim), hand);
            (Some(tx), Some(session))
        }
        GestureInput::Replay(path) => match load_replay(path) {
            Ok(recording) => {
                log::info!("replaying {} frames from {}", recording.len(), path.display());
                let (camera, detector) = recording.split(true);
                (None, Some(GestureSession::start(camera, detector)))
            }
            Err(e) => {
                log::warn!("cannot replay {}: {}; gesture control unavailable", path.display(), e);
                (None, None)
            }
        },
        GestureInput::Disabled => {
            log::info!("gesture control disabled");
            (None, None)
        }
    }
}

/// Rescan `dir`, sync the ornaments, and start decoding.  A missing or
/// unreadable directory leaves the current photos in place.
fn reload_photos(app: &mut AppState, dir: &Path) -> Option<Receiver<PhotoEvent>> {
    let paths = match photos::scan_dir(dir) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("cannot read photo directory {}: {}", dir.display(), e);
            return None;
        }
    };
    let keys: Vec<String> = paths.iter().map(|p| photos::photo_key(p)).collect();
    app.set_photos(&keys);
    Some(photos::spawn_loader(paths))
}

fn save_recording(path: &Path, recording: &ReplayRecording) -> Result<(), SceneError> {
    let out = BufWriter::new(File::create(path)?);
    recording.write_jsonl(out)?;
    log::info!("saved {} frames to {}", recording.len(), path.display());
    Ok(())
}

/// Write the session's recording if one was requested.  Failure is logged;
/// it never turns a clean exit into an error.
fn finish_recording(path: Option<&Path>, app: &mut AppState) {
    if let (Some(path), Some(rec)) = (path, app.take_recording()) {
        if let Err(e) = save_recording(path, &rec) {
            log::warn!("could not save recording to {}: {}", path.display(), e);
        }
    }
}

/// Run the full application.
///
/// Creates the gesture backend, the window and the scene, then drives the
/// event/render loop at ~60 fps until the window closes or `Q` is pressed.
pub fn run(cfg: AppConfig) -> Result<(), SceneError> {
    let (sim_tx, mut session) = start_gesture(&cfg);
    let mut vis = Visualizer::new(sim_tx, cfg.sim.step)?;
    let mut app = AppState::new(&cfg);
    if session.is_none() {
        app.gesture_unavailable();
    }

    let mut photo_rx = cfg.photos_dir.as_deref().and_then(|dir| reload_photos(&mut app, dir));

    let mut last = Instant::now();
    'frames: while vis.is_open() {
        // 1. Window input
        for action in vis.poll_input() {
            match action {
                UiAction::Quit => break 'frames,
                UiAction::ReloadPhotos => {
                    if let Some(dir) = cfg.photos_dir.as_deref() {
                        photo_rx = reload_photos(&mut app, dir).or(photo_rx);
                    }
                }
                other => { app.handle_action(other); }
            }
        }

        // 2. Detector results
        if let Some(s) = &session {
            for msg in s.drain() {
                app.handle_detector(msg);
            }
        }

        // 3. Decoded photos
        if let Some(rx) = &photo_rx {
            for event in rx.try_iter() {
                app.handle_photo(event);
            }
        }

        // 4. Motion
        let now = Instant::now();
        app.tick((now - last).as_secs_f32());
        last = now;

        // 5. Render
        vis.render(&app.view());
    }

    if let Some(s) = session.as_mut() {
        s.stop();
    }
    finish_recording(cfg.record.as_deref(), &mut app);
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
