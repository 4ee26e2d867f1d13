//! Client side of the mood-to-playlist service: capture a frame or take some
//! text, post it to the detection endpoint, render the emotion and the
//! recommended playlists.
//!
//! This crate holds everything that does not touch a concrete platform. The
//! browser and desktop front ends plug their camera, HTTP stack and screen into
//! [`Controller`] through the traits in [`ports`].

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod glyphs;
pub mod markup;
pub mod messages;
pub mod ports;
pub mod present;
pub mod types;


pub use config::ClientConfig;
pub use controller::{can_analyze, failure_message, Action, Controller};
pub use error::{CameraError, ConfigError, DetectError};
pub use ports::{Camera, CameraStream, DetectionClient, VideoConstraints, View};
pub use present::{PlaylistTile, ResultView};
pub use types::{DetectionMethod, DetectionRequest, DetectionResult, ErrorBody, Playlist};
