//! Still photos standing in for a webcam on the desktop.

use std::cell::RefCell;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use async_trait::async_trait;
use base64::prelude::{Engine as _, BASE64_STANDARD};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use moodtunes_core::{Camera, CameraError, CameraStream, VideoConstraints};

pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Photo picked by the user, shared between the worker loop and the stream.
pub type PhotoSelection = Rc<RefCell<Option<PathBuf>>>;

pub struct PhotoCamera {
    selection: PhotoSelection,
}

impl PhotoCamera {
    pub fn new(selection: PhotoSelection) -> Self {
        Self { selection }
    }
}

pub struct PhotoStream {
    selection: PhotoSelection,
    bounds: VideoConstraints,
}

#[async_trait(?Send)]
impl Camera for PhotoCamera {
    type Stream = PhotoStream;

    // A file source is always there; failures surface per snapshot
    async fn open(&self, constraints: VideoConstraints) -> Result<PhotoStream, CameraError> {
        Ok(PhotoStream {
            selection: self.selection.clone(),
            bounds: constraints,
        })
    }
}

impl CameraStream for PhotoStream {
    fn snapshot(&self) -> Result<String, CameraError> {
        let path = self
            .selection
            .borrow()
            .clone()
            .ok_or_else(|| CameraError::Frame("no photo selected".into()))?;
        encode_photo(&path, self.bounds)
    }

    fn stop(&mut self) {
        self.selection.borrow_mut().take();
    }
}

/// Loads a photo, shrinks it to fit `bounds` and encodes it as a JPEG data URL.
pub fn encode_photo(path: &Path, bounds: VideoConstraints) -> Result<String, CameraError> {
    let image = image::open(path)
        .map_err(|err| CameraError::Frame(format!("{}: {err}", path.display())))?;
    let image = if image.width() > bounds.width || image.height() > bounds.height {
        image.resize(bounds.width, bounds.height, FilterType::Triangle)
    } else {
        image
    };
    jpeg_data_url(&image)
}

pub fn jpeg_data_url(image: &DynamicImage) -> Result<String, CameraError> {
    let mut bytes = Vec::new();
    // JPEG has no alpha channel
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .map_err(|err| CameraError::Frame(err.to_string()))?;
    Ok(format!("data:image/jpeg;base64,{}", BASE64_STANDARD.encode(&bytes)))
}
