// Emotion/mood keyword -> display glyph
const GLYPHS: &[(&str, &str)] = &[
    ("happy", "😊"),
    ("sad", "😢"),
    ("angry", "😠"),
    ("fear", "😨"),
    ("surprise", "😲"),
    ("neutral", "😐"),
    ("disgust", "🤢"),
    ("excited", "🤩"),
    ("calm", "😌"),
    ("energetic", "⚡"),
    ("chill", "😎"),
];

pub const DEFAULT_GLYPH: &str = "🎵";
pub const ERROR_GLYPH: &str = "⚠️";

/// Exact lookup in the glyph table. Keys are lower case, matching what the
/// server sends.
pub fn lookup(key: &str) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, glyph)| *glyph)
}

/// Glyph for the emotion, else for the mood, else the default.
pub fn glyph_for(emotion: &str, mood: &str) -> &'static str {
    lookup(emotion)
        .or_else(|| lookup(mood))
        .unwrap_or(DEFAULT_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_wins_over_mood() {
        assert_eq!(glyph_for("happy", "energetic"), "😊");
    }

    #[test]
    fn falls_back_to_mood_then_default() {
        // "joy" is not in the table but its mood is
        assert_eq!(glyph_for("joy", "happy"), "😊");
        assert_eq!(glyph_for("love", "romantic"), DEFAULT_GLYPH);
        assert_eq!(glyph_for("", ""), DEFAULT_GLYPH);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup("Happy"), None);
        assert_eq!(lookup("energetic"), Some("⚡"));
    }
}
