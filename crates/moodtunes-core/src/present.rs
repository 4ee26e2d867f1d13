//! Toolkit-independent view model for a detection result.
//!
//! Both the HTML markup and the native egui view render from [`ResultView`],
//! so they agree on glyph choice, label casing and the empty state.

use crate::config::ClientConfig;
use crate::glyphs;
use crate::messages;
use crate::types::{DetectionResult, Playlist};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTile {
    pub title: String,
    pub url: String,
    /// Cover image, already resolved to the placeholder when missing.
    pub cover: String,
    /// Image to swap in if `cover` fails to load.
    pub fallback_cover: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub glyph: &'static str,
    pub emotion_label: String,
    pub mood_label: String,
    pub tiles: Vec<PlaylistTile>,
    /// Set iff `tiles` is empty.
    pub empty_state: Option<&'static str>,
}

impl ResultView {
    pub fn from_result(result: &DetectionResult, config: &ClientConfig) -> Self {
        let tiles: Vec<PlaylistTile> = result
            .playlists
            .iter()
            .map(|playlist| PlaylistTile::from_playlist(playlist, &config.placeholder_image))
            .collect();
        let empty_state = tiles.is_empty().then_some(messages::NO_PLAYLISTS);

        Self {
            glyph: glyphs::glyph_for(&result.emotion, &result.mood),
            emotion_label: capitalize_first(&result.emotion),
            mood_label: capitalize_first(&result.mood),
            tiles,
            empty_state,
        }
    }
}

impl PlaylistTile {
    fn from_playlist(playlist: &Playlist, placeholder: &str) -> Self {
        let cover = playlist
            .image
            .as_deref()
            .filter(|image| !image.is_empty())
            .unwrap_or(placeholder);
        Self {
            title: playlist.name.clone(),
            url: playlist.url.clone(),
            cover: cover.to_string(),
            fallback_cover: placeholder.to_string(),
        }
    }
}

/// Upper-cases the first character and leaves the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
