use std::path::PathBuf;

use hand_gesture::GestureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("window: {0}")]
    Window(String),

    #[error("photo {path}: {source}")]
    Photo {
        path:   PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Gesture(#[from] GestureError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<minifb::Error> for SceneError {
    fn from(e: minifb::Error) -> Self {
        SceneError::Window(e.to_string())
    }
}
