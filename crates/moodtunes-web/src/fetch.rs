use async_trait::async_trait;
use moodtunes_core::api::{self, CONTENT_TYPE_JSON};
use moodtunes_core::{DetectError, DetectionClient, DetectionRequest, DetectionResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::describe_js_error;

/// Detection client over `window.fetch`. No timeout and no cancellation: a
/// request runs until the browser resolves or rejects it.
pub struct FetchClient {
    endpoint: String,
}

impl FetchClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl DetectionClient for FetchClient {
    async fn detect(&self, request: &DetectionRequest) -> Result<DetectionResult, DetectError> {
        let body = api::encode_request(request)?;
        let (status, text) = post_json(&self.endpoint, &body)
            .await
            .map_err(|err| DetectError::Transport(describe_js_error(&err)))?;
        tracing::debug!(status, bytes = text.len(), "detection response");
        api::classify_response(status, &text)
    }
}

async fn post_json(url: &str, body: &str) -> Result<(u16, String), JsValue> {
    let window = web_sys::window().ok_or("No window")?;

    let headers = web_sys::Headers::new()?;
    headers.set("Content-Type", CONTENT_TYPE_JSON)?;
    headers.set("Accept", CONTENT_TYPE_JSON)?;

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(body));

    let request = web_sys::Request::new_with_str_and_init(url, &init)?;
    let response: web_sys::Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()?;

    let text = JsFuture::from(response.text()?).await?;
    Ok((response.status(), text.as_string().unwrap_or_default()))
}
