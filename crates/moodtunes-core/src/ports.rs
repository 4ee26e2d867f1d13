//! Seams between the controller and the platform it runs on.

use async_trait::async_trait;

use crate::error::{CameraError, DetectError};
use crate::types::{DetectionRequest, DetectionResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConstraints {
    pub width: u32,
    pub height: u32,
}

/// Source of live video frames.
#[async_trait(?Send)]
pub trait Camera {
    type Stream: CameraStream;

    /// Requests a video-only stream. Adapters bind the stream to their
    /// preview surface before returning it.
    async fn open(&self, constraints: VideoConstraints) -> Result<Self::Stream, CameraError>;
}

pub trait CameraStream {
    /// Current frame as a JPEG data URL, at the stream's native resolution.
    fn snapshot(&self) -> Result<String, CameraError>;

    /// Stops every underlying track, releasing the device.
    fn stop(&mut self);
}

#[async_trait(?Send)]
pub trait DetectionClient {
    async fn detect(&self, request: &DetectionRequest) -> Result<DetectionResult, DetectError>;
}

/// Everything the controller needs from the screen.
pub trait View {
    fn show_loading(&self);
    fn hide_loading(&self);
    fn show_result(&self, result: &DetectionResult);
    fn show_error(&self, message: &str);

    /// Capture path is live: enable the control.
    fn camera_ready(&self);
    /// Capture path is off: disable and relabel the control, swap the
    /// preview for the placeholder panel.
    fn camera_unavailable(&self, tooltip: &str);

    /// Blocking notice for misuse, e.g. capture without a camera.
    fn alert(&self, message: &str);
    fn set_analyze_enabled(&self, enabled: bool);
}
