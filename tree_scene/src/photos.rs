//! Photo discovery and background thumbnail decoding.
//!
//! Ornaments are created as soon as the directory is scanned; pictures
//! arrive later over a channel from a loader thread, one [`PhotoEvent`] per
//! file.  A file that fails to decode is reported, never fatal.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use image::imageops::FilterType;

use crate::error::SceneError;

/// Edge length of the square thumbnails, in pixels.
pub const THUMB_SIZE: u32 = 64;

const EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Decoded picture, `0xFFRRGGBB` row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Thumbnail {
    pub width:  u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Thumbnail {
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y.min(self.height - 1) * self.width + x.min(self.width - 1)) as usize]
    }
}

#[derive(Clone, Debug)]
pub enum PhotoEvent {
    Loaded { key: String, thumbnail: Thumbnail },
    Failed { key: String, reason: String },
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// The identity an ornament is matched by across reloads.
pub fn photo_key(path: &Path) -> String {
    path.display().to_string()
}

/// Image files directly inside `dir`, sorted by name.
pub fn scan_dir(dir: &Path) -> Result<Vec<PathBuf>, SceneError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Decode `path` and centre-crop it to a `size`×`size` thumbnail.
pub fn load_thumbnail(path: &Path, size: u32) -> Result<Thumbnail, SceneError> {
    let img = image::open(path)
        .map_err(|source| SceneError::Photo { path: path.to_path_buf(), source })?;
    let rgb = img.resize_to_fill(size, size, FilterType::Triangle).to_rgb8();
    let (width, height) = rgb.dimensions();
    let pixels = rgb
        .pixels()
        .map(|p| 0xFF00_0000 | (p[0] as u32) << 16 | (p[1] as u32) << 8 | p[2] as u32)
        .collect();
    Ok(Thumbnail { width, height, pixels })
}

/// Decode `paths` on a worker thread.  The channel closes when all are done.
pub fn spawn_loader(paths: Vec<PathBuf>) -> Receiver<PhotoEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for path in paths {
            let key = photo_key(&path);
            let event = match load_thumbnail(&path, THUMB_SIZE) {
                Ok(thumbnail) => PhotoEvent::Loaded { key, thumbnail },
                Err(e) => {
                    log::warn!("{}", e);
                    PhotoEvent::Failed { key, reason: e.to_string() }
                }
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) -> PathBuf {
        let path = dir.join(name);
        let img = RgbImage::from_fn(w, h, |x, _| if x < w / 2 { Rgb([255, 0, 0]) } else { Rgb([0, 0, 255]) });
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();
        path
    }

    #[test]
    fn scan_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "b.png", 4, 4);
        write_png(dir.path(), "a.PNG", 4, 4);
        fs::write(dir.path().join("notes.txt"), "hi").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let names: Vec<String> = scan_dir(dir.path()).unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.PNG", "b.png"]);
    }

    #[test]
    fn missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_dir(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, SceneError::Io(_)));
    }

    #[test]
    fn thumbnail_is_square_and_keeps_colours() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_png(dir.path(), "wide.png", 40, 20);
        let t = load_thumbnail(&path, 16).unwrap();
        assert_eq!((t.width, t.height), (16, 16));
        assert_eq!(t.pixels.len(), 256);
        let (left, right) = (t.pixel(0, 8), t.pixel(15, 8));
        assert!((left >> 16) & 0xFF > 200 && left & 0xFF < 50, "{left:#x}");
        assert!((right >> 16) & 0xFF < 50 && right & 0xFF > 200, "{right:#x}");
        assert_eq!(left >> 24, 0xFF);
    }

    #[test]
    fn corrupt_file_reports_photo_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"not a jpeg").unwrap();
        assert!(matches!(load_thumbnail(&path, 16), Err(SceneError::Photo { .. })));
    }

    #[test]
    fn loader_reports_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_png(dir.path(), "good.png", 8, 8);
        let bad = dir.path().join("bad.png");
        fs::write(&bad, b"garbage").unwrap();

        let events: Vec<PhotoEvent> = spawn_loader(vec![good.clone(), bad.clone()]).iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], PhotoEvent::Loaded { key, .. } if *key == photo_key(&good)));
        assert!(matches!(&events[1], PhotoEvent::Failed { key, .. } if *key == photo_key(&bad)));
    }
}
