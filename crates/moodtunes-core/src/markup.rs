//! HTML fragments for the browser view.
//!
//! Every piece of server- or user-supplied text goes through [`escape_html`]
//! before it is spliced into markup.

use std::fmt::Write as _;

use crate::glyphs::ERROR_GLYPH;
use crate::messages;
use crate::present::ResultView;

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// Only web links are allowed as anchors
fn safe_href(url: &str) -> &str {
    let lower = url.trim_start().to_ascii_lowercase();
    if lower.starts_with("https://") || lower.starts_with("http://") {
        url
    } else {
        "#"
    }
}

/// Contents of the emotion display panel.
pub fn emotion_panel(view: &ResultView) -> String {
    format!(
        r#"<div style="font-size: 3rem; margin-bottom: 15px;">{glyph}</div>
<div>Detected Emotion: <strong>{emotion}</strong></div>
<div style="margin-top: 10px;">Mood: <strong>{mood}</strong></div>"#,
        glyph = view.glyph,
        emotion = escape_html(&view.emotion_label),
        mood = escape_html(&view.mood_label),
    )
}

/// Contents of the playlist grid: one tile per playlist, or the empty state.
pub fn playlist_grid(view: &ResultView) -> String {
    if let Some(empty) = view.empty_state {
        return format!(
            r#"<div style="text-align: center; padding: 40px; color: #999; grid-column: 1/-1;"><i class="fas fa-music" style="font-size: 3rem; margin-bottom: 15px;"></i><p>{}</p></div>"#,
            escape_html(empty)
        );
    }

    let mut out = String::new();
    for tile in &view.tiles {
        let title = escape_html(&tile.title);
        let fallback = escape_html(&tile.fallback_cover.replace('\'', "%27"));
        // Writing to a String cannot fail
        let _ = write!(
            out,
            r#"<div class="playlist"><img src="{cover}" alt="{title}" onerror="this.onerror=null;this.src='{fallback}'"><a href="{href}" target="_blank" rel="noopener noreferrer">{title}</a></div>"#,
            cover = escape_html(&tile.cover),
            href = escape_html(safe_href(&tile.url)),
        );
    }
    out
}

pub fn error_panel(message: &str) -> String {
    format!(
        r#"<div style="font-size: 3rem; margin-bottom: 15px;">{ERROR_GLYPH}</div>
<div style="color: #ffebee;">{}</div>"#,
        escape_html(message)
    )
}

pub fn camera_unavailable_button() -> String {
    format!(
        r#"<i class="fas fa-camera-slash"></i> {}"#,
        messages::CAMERA_UNAVAILABLE_LABEL
    )
}

pub const CAMERA_PLACEHOLDER_STYLE: &str =
    "padding: 60px 20px; text-align: center; background: #f5f5f5; border-radius: 15px;";

pub fn camera_placeholder() -> String {
    format!(
        r#"<i class="fas fa-camera-slash" style="font-size: 48px; color: #999; margin-bottom: 15px; display: block;"></i><p style="color: #666;">{}</p><p style="font-size: 0.9rem; color: #999;">{}</p>"#,
        messages::CAMERA_PLACEHOLDER_TITLE,
        messages::CAMERA_PLACEHOLDER_HINT
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::types::{DetectionResult, Playlist};

    fn view_of(playlists: Vec<Playlist>) -> ResultView {
        ResultView::from_result(
            &DetectionResult {
                emotion: "happy".into(),
                mood: "energetic".into(),
                playlists,
                method: None,
            },
            &ClientConfig::default(),
        )
    }

    fn playlist(name: &str, url: &str) -> Playlist {
        Playlist {
            name: name.into(),
            url: url.into(),
            image: None,
        }
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>Rock & "Roll"</b>'"#),
            "&lt;b&gt;Rock &amp; &quot;Roll&quot;&lt;/b&gt;&#39;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn renders_single_tile_with_safe_link() {
        let html = playlist_grid(&view_of(vec![playlist("Pump Up", "https://x/1")]));
        assert_eq!(html.matches(r#"class="playlist""#).count(), 1);
        assert!(html.contains(r#"href="https://x/1""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains(">Pump Up</a>"));
    }

    #[test]
    fn emotion_panel_shows_labels_and_glyph() {
        let html = emotion_panel(&view_of(Vec::new()));
        assert!(html.contains("😊"));
        assert!(html.contains("<strong>Happy</strong>"));
        assert!(html.contains("<strong>Energetic</strong>"));
    }

    #[test]
    fn empty_playlists_render_no_tiles() {
        let html = playlist_grid(&view_of(Vec::new()));
        assert_eq!(html.matches(r#"class="playlist""#).count(), 0);
        assert!(html.contains(messages::NO_PLAYLISTS));
    }

    #[test]
    fn playlist_names_are_inert() {
        let html = playlist_grid(&view_of(vec![playlist(
            "<script>alert(1)</script> & friends",
            "https://x/1",
        )]));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt; &amp; friends"));
    }

    #[test]
    fn emotion_and_mood_labels_are_inert() {
        let view = ResultView::from_result(
            &DetectionResult {
                emotion: "<img src=x onerror=alert(1)>".into(),
                mood: "a & b".into(),
                playlists: Vec::new(),
                method: None,
            },
            &ClientConfig::default(),
        );
        let html = emotion_panel(&view);
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("A &amp; b"));
    }

    #[test]
    fn cover_url_quotes_stay_inside_src() {
        let html = playlist_grid(&view_of(vec![Playlist {
            name: "Pump Up".into(),
            url: "https://x/1".into(),
            image: Some(r#"https://x/cover.jpg" onload="alert(1)"#.into()),
        }]));
        assert!(html.contains(r#"src="https://x/cover.jpg&quot; onload=&quot;alert(1)""#));
        assert!(!html.contains(r#" onload=""#));
    }

    #[test]
    fn non_web_urls_do_not_become_links() {
        let html = playlist_grid(&view_of(vec![playlist("x", "javascript:alert(1)")]));
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn error_panel_escapes_message() {
        let html = error_panel("Spotify quota exceeded <again>");
        assert!(html.contains("Spotify quota exceeded &lt;again&gt;"));
        assert!(html.contains(ERROR_GLYPH));
    }

    #[test]
    fn rendering_is_idempotent() {
        let view = view_of(vec![playlist("A", "https://x/a"), playlist("B", "https://x/b")]);
        assert_eq!(playlist_grid(&view), playlist_grid(&view));
        assert_eq!(emotion_panel(&view), emotion_panel(&view));
    }
}
