use thiserror::Error;

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("expected 21 hand landmarks, got {0}")]
    LandmarkCount(usize),

    /// Model asset missing, unsupported accelerator, …
    #[error("landmark detector unavailable: {0}")]
    DetectorUnavailable(String),

    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("replay line {line}: {source}")]
    Replay {
        line:   usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("replay encode: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
