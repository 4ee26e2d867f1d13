use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "/detect_emotion";
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x200?text=No+Image";

// Client configuration shared by every front end
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Detection endpoint. Relative paths resolve against the page origin in
    /// the browser; native front ends join it onto their server base URL.
    pub endpoint: String,
    pub preferred_width: u32,
    pub preferred_height: u32,
    /// Cover shown when a playlist has no image or its image fails to load.
    pub placeholder_image: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            preferred_width: 640,
            preferred_height: 480,
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Parses a JSON config document. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Absolute endpoint URL for clients that do not run inside a page.
    pub fn endpoint_url(&self, base_url: &str) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return self.endpoint.clone();
        }
        let base = base_url.trim_end_matches('/');
        let path = self.endpoint.trim_start_matches('/');
        format!("{base}/{path}")
    }

    pub fn video_constraints(&self) -> crate::ports::VideoConstraints {
        crate::ports::VideoConstraints {
            width: self.preferred_width,
            height: self.preferred_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ClientConfig::from_json(r#"{ "preferred_width": 1280 }"#).unwrap();
        assert_eq!(config.preferred_width, 1280);
        assert_eq!(config.preferred_height, 480);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(ClientConfig::from_json("{ not json").is_err());
    }

    #[test]
    fn endpoint_url_joins_base() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint_url("http://127.0.0.1:5000/"),
            "http://127.0.0.1:5000/detect_emotion"
        );

        let absolute = ClientConfig {
            endpoint: "https://moods.example/api/detect".into(),
            ..ClientConfig::default()
        };
        assert_eq!(
            absolute.endpoint_url("http://ignored"),
            "https://moods.example/api/detect"
        );
    }
}
