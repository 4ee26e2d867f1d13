use async_trait::async_trait;
use moodtunes_core::{Camera, CameraError, CameraStream, VideoConstraints};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream};

use crate::describe_js_error;

/// Webcam behind `navigator.mediaDevices.getUserMedia`.
pub struct BrowserCamera {
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
}

impl BrowserCamera {
    pub fn new(video: HtmlVideoElement, canvas: HtmlCanvasElement) -> Self {
        Self { video, canvas }
    }
}

/// Live stream bound to the preview `<video>`.
pub struct BrowserStream {
    stream: MediaStream,
    video: HtmlVideoElement,
    canvas: HtmlCanvasElement,
}

#[async_trait(?Send)]
impl Camera for BrowserCamera {
    type Stream = BrowserStream;

    async fn open(&self, constraints: VideoConstraints) -> Result<BrowserStream, CameraError> {
        let stream = request_video(constraints)
            .await
            .map_err(|err| camera_error(&err))?;
        self.video.set_src_object(Some(&stream));

        Ok(BrowserStream {
            stream,
            video: self.video.clone(),
            canvas: self.canvas.clone(),
        })
    }
}

impl CameraStream for BrowserStream {
    fn snapshot(&self) -> Result<String, CameraError> {
        let width = self.video.video_width();
        let height = self.video.video_height();
        if width == 0 || height == 0 {
            return Err(CameraError::Frame("no frame decoded yet".into()));
        }

        // Canvas matches the native frame size, not the preview's CSS size
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let context = self
            .canvas
            .get_context("2d")
            .map_err(|err| frame_error(&err))?
            .ok_or_else(|| CameraError::Frame("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| CameraError::Frame("unexpected canvas context".into()))?;
        context
            .draw_image_with_html_video_element(&self.video, 0.0, 0.0)
            .map_err(|err| frame_error(&err))?;

        self.canvas
            .to_data_url_with_type("image/jpeg")
            .map_err(|err| frame_error(&err))
    }

    fn stop(&mut self) {
        for track in self.stream.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
                track.stop();
            }
        }
        self.video.set_src_object(None);
    }
}

// Request camera access, video only
async fn request_video(constraints: VideoConstraints) -> Result<MediaStream, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let media_devices = window.navigator().media_devices()?;
    if media_devices.is_undefined() {
        return Err(JsValue::from_str("mediaDevices unavailable (insecure context?)"));
    }

    let video = js_sys::Object::new();
    js_sys::Reflect::set(&video, &"width".into(), &JsValue::from(constraints.width))?;
    js_sys::Reflect::set(&video, &"height".into(), &JsValue::from(constraints.height))?;

    let request = web_sys::MediaStreamConstraints::new();
    request.set_audio(&JsValue::FALSE);
    request.set_video(&video);

    let promise = media_devices.get_user_media_with_constraints(&request)?;
    let stream: MediaStream = wasm_bindgen_futures::JsFuture::from(promise).await?.into();
    Ok(stream)
}

fn camera_error(err: &JsValue) -> CameraError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(exception) => classify_camera_failure(&exception.name(), &exception.message()),
        None => CameraError::Unsupported(describe_js_error(err)),
    }
}

/// Maps a `getUserMedia` rejection name onto the camera error kinds.
pub fn classify_camera_failure(name: &str, message: &str) -> CameraError {
    let detail = if message.is_empty() {
        name.to_string()
    } else {
        format!("{name}: {message}")
    };
    match name {
        "NotAllowedError" | "SecurityError" | "PermissionDeniedError" => {
            CameraError::Denied(detail)
        }
        "NotFoundError" | "OverconstrainedError" | "NotReadableError" | "AbortError"
        | "DevicesNotFoundError" => CameraError::NoDevice(detail),
        _ => CameraError::Unsupported(detail),
    }
}

fn frame_error(err: &JsValue) -> CameraError {
    CameraError::Frame(describe_js_error(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_rejections_are_denials() {
        assert!(matches!(
            classify_camera_failure("NotAllowedError", "Permission denied"),
            CameraError::Denied(detail) if detail == "NotAllowedError: Permission denied"
        ));
        assert!(matches!(
            classify_camera_failure("SecurityError", ""),
            CameraError::Denied(detail) if detail == "SecurityError"
        ));
    }

    #[test]
    fn missing_hardware_is_no_device() {
        for name in ["NotFoundError", "OverconstrainedError", "NotReadableError"] {
            assert!(matches!(
                classify_camera_failure(name, ""),
                CameraError::NoDevice(_)
            ));
        }
    }

    #[test]
    fn anything_else_is_unsupported() {
        assert!(matches!(
            classify_camera_failure("TypeError", "constraints"),
            CameraError::Unsupported(_)
        ));
    }
}
