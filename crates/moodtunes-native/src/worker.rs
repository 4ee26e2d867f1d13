//! Worker thread owning the controller, bridged to the UI by channels.

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use eframe::egui;
use futures::executor::block_on;
use moodtunes_core::{ClientConfig, Controller, DetectionResult, View};

use crate::client::UreqClient;
use crate::photo::PhotoCamera;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// UI -> worker.
#[derive(Debug)]
pub enum Command {
    Capture(PathBuf),
    AnalyzeText(String),
    TextChanged(String),
    Shutdown,
}

/// Worker -> UI, one variant per view call.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Loading(bool),
    Result(DetectionResult),
    Error(String),
    CameraReady,
    CameraUnavailable(String),
    Alert(String),
    AnalyzeEnabled(bool),
}

/// View that forwards every call to the UI thread.
pub struct ChannelView {
    events: Sender<UiEvent>,
    repaint: Option<egui::Context>,
}

impl ChannelView {
    pub fn new(events: Sender<UiEvent>, repaint: Option<egui::Context>) -> Self {
        Self { events, repaint }
    }

    fn send(&self, event: UiEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("ui closed, dropping view update");
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

impl View for ChannelView {
    fn show_loading(&self) {
        self.send(UiEvent::Loading(true));
    }

    fn hide_loading(&self) {
        self.send(UiEvent::Loading(false));
    }

    fn show_result(&self, result: &DetectionResult) {
        self.send(UiEvent::Result(result.clone()));
    }

    fn show_error(&self, message: &str) {
        self.send(UiEvent::Error(message.to_string()));
    }

    fn camera_ready(&self) {
        self.send(UiEvent::CameraReady);
    }

    fn camera_unavailable(&self, tooltip: &str) {
        self.send(UiEvent::CameraUnavailable(tooltip.to_string()));
    }

    fn alert(&self, message: &str) {
        self.send(UiEvent::Alert(message.to_string()));
    }

    fn set_analyze_enabled(&self, enabled: bool) {
        self.send(UiEvent::AnalyzeEnabled(enabled));
    }
}

pub struct WorkerHandle {
    pub commands: Sender<Command>,
    pub events: Receiver<UiEvent>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Asks the worker to release the camera and waits for it to exit.
    pub fn shutdown(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("worker thread panicked");
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

pub fn spawn(config: ClientConfig, base_url: &str, repaint: Option<egui::Context>) -> WorkerHandle {
    let (cmd_tx, cmd_rx) = unbounded::<Command>();
    let (ui_tx, ui_rx) = unbounded::<UiEvent>();
    let url = config.endpoint_url(base_url);

    let thread = thread::spawn(move || {
        let client = UreqClient::new(url, REQUEST_TIMEOUT);
        tracing::info!(url = client.url(), "detection worker started");
        run(config, client, ChannelView::new(ui_tx, repaint), &cmd_rx);
    });

    WorkerHandle {
        commands: cmd_tx,
        events: ui_rx,
        thread: Some(thread),
    }
}

// Commands run one at a time, so flows never overlap on the desktop
fn run(config: ClientConfig, client: UreqClient, view: ChannelView, commands: &Receiver<Command>) {
    let selection = Rc::new(RefCell::new(None));
    let controller = Controller::new(PhotoCamera::new(selection.clone()), client, view, config);
    block_on(controller.initialize_camera());

    for command in commands {
        match command {
            Command::Capture(path) => {
                *selection.borrow_mut() = Some(path);
                block_on(controller.capture_and_detect());
            }
            Command::AnalyzeText(text) => block_on(controller.analyze_text(&text)),
            Command::TextChanged(text) => {
                controller.on_text_input(&text);
            }
            Command::Shutdown => break,
        }
    }

    controller.teardown();
    tracing::info!("detection worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn view_calls_become_ui_events() {
        let (tx, rx) = unbounded();
        let view = ChannelView::new(tx, None);

        view.show_loading();
        view.hide_loading();
        view.show_error("Spotify quota exceeded");
        view.set_analyze_enabled(true);

        let events: Vec<UiEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                UiEvent::Loading(true),
                UiEvent::Loading(false),
                UiEvent::Error("Spotify quota exceeded".into()),
                UiEvent::AnalyzeEnabled(true),
            ]
        );
    }

    #[test]
    fn closed_ui_does_not_panic() {
        let (tx, rx) = unbounded();
        drop(rx);
        ChannelView::new(tx, None).show_loading();
    }

    #[test]
    fn worker_reports_camera_and_validates_text() {
        let mut handle = spawn(ClientConfig::default(), "http://127.0.0.1:9", None);
        handle
            .commands
            .send(Command::AnalyzeText("   ".into()))
            .unwrap();
        handle.shutdown();

        let events: Vec<UiEvent> = handle.events.try_iter().collect();
        assert_eq!(
            events,
            vec![
                UiEvent::CameraReady,
                UiEvent::Error(moodtunes_core::messages::EMPTY_TEXT.into()),
            ]
        );
    }
}
