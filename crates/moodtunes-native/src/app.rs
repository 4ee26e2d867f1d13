use eframe::egui::{self, Color32, RichText};
use moodtunes_core::glyphs::ERROR_GLYPH;
use moodtunes_core::{messages, ClientConfig, ResultView};

use crate::photo::PHOTO_EXTENSIONS;
use crate::worker::{Command, UiEvent, WorkerHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraState {
    Pending,
    Ready,
    Unavailable(String),
}

// What the result area shows; each new outcome replaces the last
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Detected(ResultView),
    Failed(String),
}

pub struct MoodTunesApp {
    worker: WorkerHandle,
    config: ClientConfig,
    text: String,
    loading: bool,
    camera: CameraState,
    analyze_enabled: bool,
    outcome: Option<Outcome>,
    alert: Option<String>,
}

impl MoodTunesApp {
    pub fn new(worker: WorkerHandle, config: ClientConfig) -> Self {
        Self {
            worker,
            config,
            text: String::new(),
            loading: false,
            camera: CameraState::Pending,
            analyze_enabled: false,
            outcome: None,
            alert: None,
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Loading(loading) => self.loading = loading,
            UiEvent::Result(result) => {
                self.outcome = Some(Outcome::Detected(ResultView::from_result(
                    &result,
                    &self.config,
                )));
            }
            UiEvent::Error(message) => self.outcome = Some(Outcome::Failed(message)),
            UiEvent::CameraReady => self.camera = CameraState::Ready,
            UiEvent::CameraUnavailable(tooltip) => self.camera = CameraState::Unavailable(tooltip),
            UiEvent::Alert(message) => self.alert = Some(message),
            UiEvent::AnalyzeEnabled(enabled) => self.analyze_enabled = enabled,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.worker.events.try_recv() {
            self.apply(event);
        }
    }

    fn dispatch(&mut self, command: Command) {
        if self.worker.commands.send(command).is_err() {
            self.outcome = Some(Outcome::Failed(
                "Detection worker stopped; please restart the app.".to_string(),
            ));
        }
    }

    fn pick_photo_and_capture(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Choose a photo of your face")
            .add_filter("Images", PHOTO_EXTENSIONS)
            .pick_file()
        {
            self.dispatch(Command::Capture(path));
        }
    }

    fn draw_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading("📷 Facial emotion");
        let camera = self.camera.clone();
        match &camera {
            CameraState::Pending => {
                ui.add_enabled(false, egui::Button::new("Capture Emotion"));
            }
            CameraState::Ready => {
                if ui
                    .add_enabled(!self.loading, egui::Button::new("Capture Emotion"))
                    .on_hover_text("Pick a photo to analyze")
                    .clicked()
                {
                    self.pick_photo_and_capture();
                }
            }
            CameraState::Unavailable(tooltip) => {
                ui.add_enabled(false, egui::Button::new(messages::CAMERA_UNAVAILABLE_LABEL))
                    .on_disabled_hover_text(tooltip.as_str());
                ui.weak(messages::CAMERA_PLACEHOLDER_TITLE);
                ui.weak(messages::CAMERA_PLACEHOLDER_HINT);
            }
        }

        ui.add_space(12.0);
        ui.heading("✍ Text emotion");
        let edit = ui.add(
            egui::TextEdit::multiline(&mut self.text)
                .hint_text("How are you feeling today?")
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
        if edit.changed() {
            self.dispatch(Command::TextChanged(self.text.clone()));
        }
        if ui
            .add_enabled(
                self.analyze_enabled && !self.loading,
                egui::Button::new("Analyze Text"),
            )
            .clicked()
        {
            self.dispatch(Command::AnalyzeText(self.text.clone()));
        }
    }

    fn draw_outcome(&self, ui: &mut egui::Ui) {
        if self.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Detecting emotion…");
            });
            return;
        }

        match &self.outcome {
            None => {}
            Some(Outcome::Failed(message)) => {
                ui.label(RichText::new(ERROR_GLYPH).size(40.0));
                ui.colored_label(Color32::from_rgb(229, 115, 115), message);
            }
            Some(Outcome::Detected(view)) => {
                ui.label(RichText::new(view.glyph).size(40.0));
                ui.horizontal(|ui| {
                    ui.label("Detected Emotion:");
                    ui.strong(&view.emotion_label);
                });
                ui.horizontal(|ui| {
                    ui.label("Mood:");
                    ui.strong(&view.mood_label);
                });
                ui.separator();
                if let Some(empty) = view.empty_state {
                    ui.weak(empty);
                }
                for tile in &view.tiles {
                    // Opens in the system browser
                    ui.hyperlink_to(format!("🎵 {}", tile.title), &tile.url);
                }
            }
        }
    }

    fn draw_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.alert.clone() else {
            return;
        };
        let (title, message) = alert_parts(&alert);
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    self.alert = None;
                }
            });
    }
}

/// Splits an alert into window title and body. The first paragraph becomes the
/// title when the message has one, so the heading is not shown twice.
fn alert_parts(alert: &str) -> (&str, &str) {
    match alert.split_once("\n\n") {
        Some((heading, body)) if !heading.contains('\n') => (heading.trim(), body.trim()),
        _ => ("MoodTunes", alert.trim()),
    }
}

impl eframe::App for MoodTunesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("🎵 MoodTunes");
                ui.separator();
                self.draw_inputs(ui);
                ui.add_space(16.0);
                ui.separator();
                self.draw_outcome(ui);
            });
        });

        self.draw_alert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker;
    use moodtunes_core::{DetectionResult, Playlist};

    fn app() -> MoodTunesApp {
        MoodTunesApp::new(
            worker::spawn(ClientConfig::default(), "http://127.0.0.1:9", None),
            ClientConfig::default(),
        )
    }

    #[test]
    fn result_event_replaces_previous_error() {
        let mut app = app();
        app.apply(UiEvent::Error(messages::NETWORK_ERROR.into()));
        app.apply(UiEvent::Result(DetectionResult {
            emotion: "happy".into(),
            mood: "energetic".into(),
            playlists: vec![Playlist {
                name: "Pump Up".into(),
                url: "https://x/1".into(),
                image: None,
            }],
            method: None,
        }));

        let Some(Outcome::Detected(view)) = &app.outcome else {
            panic!("expected a detected outcome, got {:?}", app.outcome);
        };
        assert_eq!(view.emotion_label, "Happy");
        assert_eq!(view.mood_label, "Energetic");
        assert_eq!(view.tiles.len(), 1);
    }

    #[test]
    fn alert_heading_becomes_the_window_title() {
        let (title, body) = alert_parts(messages::CAMERA_UNAVAILABLE_ALERT);
        assert_eq!(title, "⚠️ Camera Not Available");
        assert!(body.starts_with("Facial emotion detection requires camera access."));
        assert!(!body.contains("Camera Not Available"));

        assert_eq!(alert_parts("Just a note"), ("MoodTunes", "Just a note"));
    }

    #[test]
    fn camera_and_control_events_update_state() {
        let mut app = app();
        app.apply(UiEvent::CameraUnavailable("no device".into()));
        app.apply(UiEvent::AnalyzeEnabled(true));
        app.apply(UiEvent::Loading(true));
        app.apply(UiEvent::Alert(messages::CAMERA_UNAVAILABLE_ALERT.into()));

        assert_eq!(app.camera, CameraState::Unavailable("no device".into()));
        assert!(app.analyze_enabled);
        assert!(app.loading);
        assert_eq!(app.alert.as_deref(), Some(messages::CAMERA_UNAVAILABLE_ALERT));
    }
}
