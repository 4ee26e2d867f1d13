use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CameraError {
    #[error("camera access denied: {0}")]
    Denied(String),
    #[error("no camera device available: {0}")]
    NoDevice(String),
    #[error("camera capture unsupported: {0}")]
    Unsupported(String),
    #[error("could not read a frame from the camera: {0}")]
    Frame(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    /// Non-2xx response with a decodable body.
    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server {
        status: u16,
        message: Option<String>,
    },
    /// The request never produced a response.
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("malformed response body: {0}")]
    Malformed(String),
}

impl DetectError {
    /// Message the server supplied, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::Malformed(_) => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Malformed(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),
}
