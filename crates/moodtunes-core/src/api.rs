//! Wire contract of the detection endpoint, independent of the HTTP stack.

use crate::error::DetectError;
use crate::types::{DetectionRequest, DetectionResult, ErrorBody};

pub const CONTENT_TYPE_JSON: &str = "application/json";

pub fn encode_request(request: &DetectionRequest) -> Result<String, DetectError> {
    serde_json::to_string(request).map_err(|err| DetectError::Malformed(err.to_string()))
}

/// Turns a status code and raw body into the detection outcome.
///
/// A body that does not decode is reported as [`DetectError::Malformed`]
/// whatever the status, so callers treat it like a transport failure.
pub fn classify_response(status: u16, body: &str) -> Result<DetectionResult, DetectError> {
    if (200..300).contains(&status) {
        return serde_json::from_str(body).map_err(|err| DetectError::Malformed(err.to_string()));
    }

    let error: ErrorBody =
        serde_json::from_str(body).map_err(|err| DetectError::Malformed(err.to_string()))?;
    Err(DetectError::Server {
        status,
        message: error.error.filter(|message| !message.is_empty()),
    })
}
