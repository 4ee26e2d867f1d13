use std::cell::{Cell, RefCell};

use tracing::{debug, info, warn};
use web_time::Instant;

use crate::config::ClientConfig;
use crate::error::DetectError;
use crate::messages;
use crate::ports::{Camera, CameraStream, DetectionClient, View};
use crate::types::DetectionRequest;

/// Which user action started a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Capture,
    Text,
}

impl Action {
    fn fallback_message(self) -> &'static str {
        match self {
            Self::Capture => messages::DETECT_FAILED,
            Self::Text => messages::ANALYZE_FAILED,
        }
    }
}

/// Message shown to the user for a failed detection.
pub fn failure_message(err: &DetectError, action: Action) -> &str {
    if err.is_transport() {
        return messages::NETWORK_ERROR;
    }
    err.server_message()
        .unwrap_or_else(|| action.fallback_message())
}

/// True iff the raw text input is worth sending.
pub fn can_analyze(raw: &str) -> bool {
    !raw.trim().is_empty()
}

// Counts one pending request; released on completion or when the flow's
// future is dropped mid-request
struct InFlight<'a>(&'a Cell<usize>);

impl<'a> InFlight<'a> {
    fn enter(count: &'a Cell<usize>) -> Self {
        count.set(count.get() + 1);
        Self(count)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Owns the camera stream and drives the capture/analyze flows.
///
/// Every method takes `&self` so one instance can sit behind an `Rc` shared by
/// all event handlers of a page. Two flows may overlap; nothing orders their
/// responses, the one that resolves last decides what is on screen.
pub struct Controller<C: Camera, D, V> {
    camera: C,
    client: D,
    view: V,
    config: ClientConfig,
    stream: RefCell<Option<C::Stream>>,
    camera_available: Cell<bool>,
    torn_down: Cell<bool>,
    in_flight: Cell<usize>,
}

impl<C, D, V> Controller<C, D, V>
where
    C: Camera,
    D: DetectionClient,
    V: View,
{
    pub fn new(camera: C, client: D, view: V, config: ClientConfig) -> Self {
        Self {
            camera,
            client,
            view,
            config,
            stream: RefCell::new(None),
            camera_available: Cell::new(false),
            torn_down: Cell::new(false),
            in_flight: Cell::new(0),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn is_camera_available(&self) -> bool {
        self.camera_available.get()
    }

    pub fn has_stream(&self) -> bool {
        self.stream.borrow().is_some()
    }

    /// Detection requests still awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    /// One-shot camera acquisition at startup.
    pub async fn initialize_camera(&self) {
        if self.has_stream() || self.torn_down.get() {
            return;
        }

        let constraints = self.config.video_constraints();
        debug!(width = constraints.width, height = constraints.height, "requesting camera");
        match self.camera.open(constraints).await {
            Ok(mut stream) => {
                if self.torn_down.get() {
                    // Page went away while the permission prompt was open
                    stream.stop();
                    return;
                }
                *self.stream.borrow_mut() = Some(stream);
                self.camera_available.set(true);
                info!("camera ready");
                self.view.camera_ready();
            }
            Err(err) => {
                warn!(error = %err, "camera unavailable, capture disabled");
                self.camera_available.set(false);
                self.view.camera_unavailable(messages::CAMERA_UNAVAILABLE_TOOLTIP);
            }
        }
    }

    pub async fn capture_and_detect(&self) {
        if !self.camera_available.get() || !self.has_stream() {
            self.view.alert(messages::CAMERA_UNAVAILABLE_ALERT);
            return;
        }

        self.view.show_loading();
        let snapshot = match self.stream.borrow().as_ref() {
            Some(stream) => stream.snapshot(),
            None => Err(crate::error::CameraError::Frame("stream released".into())),
        };

        match snapshot {
            Ok(data_url) => {
                self.run_detection(DetectionRequest::image(data_url), Action::Capture)
                    .await;
            }
            Err(err) => {
                warn!(error = %err, "snapshot failed");
                self.view.hide_loading();
                self.view.show_error(messages::CAPTURE_FAILED);
            }
        }
    }

    pub async fn analyze_text(&self, raw: &str) {
        let Some(request) = DetectionRequest::text(raw) else {
            self.view.show_error(messages::EMPTY_TEXT);
            return;
        };

        self.view.show_loading();
        self.run_detection(request, Action::Text).await;
    }

    /// Keeps the analyze control in sync with the text input.
    pub fn on_text_input(&self, raw: &str) -> bool {
        let enabled = can_analyze(raw);
        self.view.set_analyze_enabled(enabled);
        enabled
    }

    /// Releases the camera. Safe to call more than once.
    pub fn teardown(&self) {
        self.torn_down.set(true);
        self.camera_available.set(false);
        let stream = self.stream.borrow_mut().take();
        if let Some(mut stream) = stream {
            stream.stop();
            info!("camera released");
        }
    }

    async fn run_detection(&self, request: DetectionRequest, action: Action) {
        let pending = self.in_flight.get();
        if pending > 0 {
            warn!(pending, "detection already in flight, the last response to arrive wins");
        }
        let guard = InFlight::enter(&self.in_flight);

        let started = Instant::now();
        debug!(kind = request.kind(), "sending detection request");
        let outcome = self.client.detect(&request).await;
        drop(guard);

        self.view.hide_loading();
        match outcome {
            Ok(result) => {
                info!(
                    emotion = %result.emotion,
                    mood = %result.mood,
                    playlists = result.playlists.len(),
                    method = ?result.method,
                    elapsed = ?started.elapsed(),
                    "emotion detected"
                );
                self.view.show_result(&result);
            }
            Err(err) => {
                warn!(error = %err, ?action, elapsed = ?started.elapsed(), "detection failed");
                self.view.show_error(failure_message(&err, action));
            }
        }
    }
}
