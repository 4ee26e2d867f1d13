use std::rc::Rc;

use moodtunes_core::markup;
use moodtunes_core::{ClientConfig, DetectionResult, ResultView, View};
use web_sys::{ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::page::Page;

const SHOW_CLASS: &str = "show";
const PLACEHOLDER_ID: &str = "camera-placeholder";

/// Renders controller output into the page. Every call replaces what the
/// previous one wrote, so repeated renders never accumulate.
pub struct DomView {
    page: Rc<Page>,
    config: ClientConfig,
}

impl DomView {
    pub fn new(page: Rc<Page>, config: ClientConfig) -> Self {
        Self { page, config }
    }

    fn reveal_results(&self) {
        self.page.result_section.class_list().add_1(SHOW_CLASS).ok();
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Nearest);
        self.page
            .result_section
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn show_camera_placeholder(&self) {
        if self.page.document.get_element_by_id(PLACEHOLDER_ID).is_some() {
            return;
        }
        let Some(container) = self.page.video_container() else {
            return;
        };
        let Ok(placeholder) = self.page.document.create_element("div") else {
            return;
        };
        placeholder.set_id(PLACEHOLDER_ID);
        placeholder
            .set_attribute("style", markup::CAMERA_PLACEHOLDER_STYLE)
            .ok();
        placeholder.set_inner_html(&markup::camera_placeholder());
        container.append_child(&placeholder).ok();
    }
}

impl View for DomView {
    fn show_loading(&self) {
        self.page.loading.class_list().add_1(SHOW_CLASS).ok();
    }

    fn hide_loading(&self) {
        self.page.loading.class_list().remove_1(SHOW_CLASS).ok();
    }

    fn show_result(&self, result: &DetectionResult) {
        let view = ResultView::from_result(result, &self.config);
        self.page
            .emotion_display
            .set_inner_html(&markup::emotion_panel(&view));
        self.page
            .playlists
            .set_inner_html(&markup::playlist_grid(&view));
        self.reveal_results();
    }

    fn show_error(&self, message: &str) {
        self.page
            .emotion_display
            .set_inner_html(&markup::error_panel(message));
        self.page.playlists.set_inner_html("");
        self.reveal_results();
    }

    fn camera_ready(&self) {
        self.page.capture_button.set_disabled(false);
    }

    fn camera_unavailable(&self, tooltip: &str) {
        let button = &self.page.capture_button;
        button.set_disabled(true);
        button.set_inner_html(&markup::camera_unavailable_button());
        button.set_title(tooltip);

        self.page.video.style().set_property("display", "none").ok();
        self.show_camera_placeholder();
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            window.alert_with_message(message).ok();
        }
    }

    fn set_analyze_enabled(&self, enabled: bool) {
        self.page.analyze_button.set_disabled(!enabled);
    }
}
