use serde::{Deserialize, Deserializer, Serialize};

/// Payload posted to the detection endpoint. Exactly one field is present on
/// the wire: `{"image": ...}` or `{"text": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetectionRequest {
    Image { image: String },
    Text { text: String },
}

impl DetectionRequest {
    pub fn image(data_url: impl Into<String>) -> Self {
        Self::Image {
            image: data_url.into(),
        }
    }

    /// Builds a text request from raw input. Returns `None` when the input is
    /// empty after trimming.
    pub fn text(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::Text {
                text: trimmed.to_string(),
            })
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Image { .. } => "image",
            Self::Text { .. } => "text",
        }
    }
}

// How the server arrived at the emotion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Facial,
    Text,
    /// Any method this client does not know about.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub emotion: String,
    pub mood: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub playlists: Vec<Playlist>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<DetectionMethod>,
}

// `"playlists": null` means no recommendations
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a non-2xx response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
