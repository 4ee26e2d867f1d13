mod app;
mod client;
mod photo;
mod worker;

use std::path::Path;

use eframe::egui;
use moodtunes_core::ClientConfig;
use tracing_subscriber::EnvFilter;

use crate::app::MoodTunesApp;

/// Base URL of the detection server.
const SERVER_URL_ENV: &str = "MOODTUNES_SERVER_URL";
/// Optional path to a JSON [`ClientConfig`].
const CONFIG_PATH_ENV: &str = "MOODTUNES_CONFIG";
const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";

fn load_config() -> ClientConfig {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => load_config_from(Path::new(&path)),
        Err(_) => ClientConfig::default(),
    }
}

// Falls back to defaults so a bad file never blocks startup
fn load_config_from(path: &Path) -> ClientConfig {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not read config, using defaults");
            return ClientConfig::default();
        }
    };
    match ClientConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "invalid config, using defaults");
            ClientConfig::default()
        }
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let base_url =
        std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let config = load_config();
    tracing::info!(%base_url, endpoint = %config.endpoint, "starting moodtunes");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MoodTunes")
            .with_inner_size([720.0, 680.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "MoodTunes",
        options,
        Box::new(move |cc| {
            let worker = worker::spawn(config.clone(), &base_url, Some(cc.egui_ctx.clone()));
            Ok(Box::new(MoodTunesApp::new(worker, config)))
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_invalid_config_falls_back_to_defaults() {
        assert_eq!(
            load_config_from(Path::new("/definitely/not/here.json")),
            ClientConfig::default()
        );

        let path = std::env::temp_dir().join(format!("moodtunes-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config_from(&path), ClientConfig::default());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn config_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("moodtunes-ok-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "endpoint": "/api/detect" }"#).unwrap();
        let config = load_config_from(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.endpoint, "/api/detect");
        assert_eq!(config.preferred_width, ClientConfig::default().preferred_width);
    }
}
