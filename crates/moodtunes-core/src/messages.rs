//! User-facing strings.

pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub const DETECT_FAILED: &str = "Failed to detect emotion. Please try again.";
pub const ANALYZE_FAILED: &str = "Failed to analyze text. Please try again.";
pub const EMPTY_TEXT: &str = "Please enter some text to analyze.";
pub const CAPTURE_FAILED: &str = "Could not capture a frame from the camera. Please try again.";

pub const CAMERA_UNAVAILABLE_ALERT: &str = "⚠️ Camera Not Available\n\n\
Facial emotion detection requires camera access. Please:\n\n\
1. Enable camera permissions in your browser\n\
2. Reload the page\n\
3. Or use Text Emotion Detection instead";

pub const CAMERA_UNAVAILABLE_LABEL: &str = "Camera Unavailable";
pub const CAMERA_UNAVAILABLE_TOOLTIP: &str = "Camera access denied or not available. \
Please check browser permissions or use text emotion detection instead.";
pub const CAMERA_PLACEHOLDER_TITLE: &str = "Camera not available";
pub const CAMERA_PLACEHOLDER_HINT: &str = "Please use text emotion detection";

pub const NO_PLAYLISTS: &str = "No playlists found. Please check your Spotify API configuration.";
