use moodtunes_core::{ClientConfig, ConfigError};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement,
    HtmlTextAreaElement, HtmlVideoElement,
};

/// Id of the optional `<script type="application/json">` holding a [`PageConfig`].
pub const CONFIG_ELEMENT_ID: &str = "moodtunes-config";

// Element ids the controller binds to
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub video: String,
    pub canvas: String,
    pub capture_button: String,
    pub analyze_button: String,
    pub emotion_display: String,
    pub playlists: String,
    pub loading: String,
    pub result_section: String,
    pub text_input: String,
    /// CSS selector of the box that receives the camera placeholder.
    pub video_container: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            video: "video".into(),
            canvas: "canvas".into(),
            capture_button: "capture-btn".into(),
            analyze_button: "analyze-text-btn".into(),
            emotion_display: "emotion-display".into(),
            playlists: "playlists".into(),
            loading: "loading".into(),
            result_section: "result-section".into(),
            text_input: "text-input".into(),
            video_container: ".video-container".into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    #[serde(flatten)]
    pub client: ClientConfig,
    pub elements: ElementIds,
}

impl PageConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads the embedded config block, falling back to defaults when it is
    /// absent or invalid.
    pub fn load(document: &Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&text) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "ignoring page config");
                Self::default()
            }
        }
    }
}

/// Handles to every element the client touches.
pub struct Page {
    pub document: Document,
    pub video: HtmlVideoElement,
    pub canvas: HtmlCanvasElement,
    pub capture_button: HtmlButtonElement,
    pub analyze_button: HtmlButtonElement,
    pub emotion_display: Element,
    pub playlists: Element,
    pub loading: Element,
    pub result_section: Element,
    pub text_input: Element,
    video_container: String,
}

impl Page {
    pub fn bind(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        // The snapshot canvas is off-screen; make one if the page has none
        let canvas = match document.get_element_by_id(&ids.canvas) {
            Some(element) => element.dyn_into::<HtmlCanvasElement>().map_err(|_| {
                JsValue::from_str(&format!("element '{}' is not a canvas", ids.canvas))
            })?,
            None => document
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()?,
        };

        Ok(Self {
            document: document.clone(),
            video: element(document, &ids.video)?,
            canvas,
            capture_button: element(document, &ids.capture_button)?,
            analyze_button: element(document, &ids.analyze_button)?,
            emotion_display: element(document, &ids.emotion_display)?,
            playlists: element(document, &ids.playlists)?,
            loading: element(document, &ids.loading)?,
            result_section: element(document, &ids.result_section)?,
            text_input: element(document, &ids.text_input)?,
            video_container: ids.video_container.clone(),
        })
    }

    /// Current contents of the text input, `<textarea>` or `<input>`.
    pub fn text_value(&self) -> String {
        if let Some(area) = self.text_input.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(input) = self.text_input.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else {
            self.text_input.text_content().unwrap_or_default()
        }
    }

    pub fn video_container(&self) -> Option<Element> {
        self.document
            .query_selector(&self.video_container)
            .ok()
            .flatten()
            .or_else(|| self.video.parent_element())
    }
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id '{id}'")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element '{id}' has an unexpected type")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_uses_page_defaults() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.elements.capture_button, "capture-btn");
        assert_eq!(config.client.endpoint, "/detect_emotion");
    }

    #[test]
    fn client_keys_sit_at_top_level() {
        let config = PageConfig::from_json(
            r#"{ "endpoint": "/api/detect", "preferred_height": 720, "elements": { "video": "cam" } }"#,
        )
        .unwrap();
        assert_eq!(config.client.endpoint, "/api/detect");
        assert_eq!(config.client.preferred_height, 720);
        assert_eq!(config.client.preferred_width, 640);
        assert_eq!(config.elements.video, "cam");
        assert_eq!(config.elements.text_input, "text-input");
    }
}
