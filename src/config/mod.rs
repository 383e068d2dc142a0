use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::error;

use crate::catalog::Department;

const DEFAULT_DELAY_SCALE: f32 = 1.0;
const DEFAULT_HISTORY_LIMIT: usize = 200;

// ─── TOML config file ─────────────────────────────────────────────────────────

/// `{data_dir}/config.toml` — all fields are optional overrides.
/// Priority: CLI / env var  >  TOML  >  built-in default.
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    /// Log level filter string, e.g. "debug", "info,munibot=trace" (default: "info").
    log: Option<String>,
    /// Log output format: "pretty" (default, human-readable) | "json" (structured).
    log_format: Option<String>,
    /// Multiplier applied to narration and response delays. 0 disables pacing
    /// entirely (useful for scripting). Default: 1.0.
    delay_scale: Option<f32>,
    /// Department id selected when no keyword scores (default: "gov").
    fallback_department: Option<String>,
    /// Path to a catalog overlay TOML file (keyword/intent table overrides).
    catalog_overlay: Option<PathBuf>,
    /// Maximum transcript entries kept in the history file (0 = unbounded; default: 200).
    history_limit: Option<usize>,
}

fn load_toml(data_dir: &Path) -> Option<TomlConfig> {
    let path = data_dir.join("config.toml");
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            error!(path = %path.display(), err = %e, "failed to parse config.toml — using defaults");
            None
        }
    }
}

// ─── MunibotConfig ────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct MunibotConfig {
    pub data_dir: PathBuf,
    pub log: String,
    /// "pretty" | "json".
    pub log_format: String,
    /// 0.0 disables all artificial delays.
    pub delay_scale: f32,
    /// Department used when no keyword matches anywhere.
    pub fallback_department: Department,
    /// Optional keyword/intent table overrides.
    pub catalog_overlay: Option<PathBuf>,
    /// Transcript retention (0 = unbounded).
    pub history_limit: usize,
}

impl MunibotConfig {
    /// Build config from CLI/env args + optional TOML file.
    ///
    /// Priority (highest to lowest):
    ///   1. CLI / env — passed as `Some(value)` from clap
    ///   2. TOML file at `{data_dir}/config.toml`
    ///   3. Built-in defaults
    pub fn new(data_dir: Option<PathBuf>, log: Option<String>, no_delays: bool) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);

        // Load TOML as the lowest-priority override layer.
        let toml = load_toml(&data_dir).unwrap_or_default();

        let log = log.or(toml.log).unwrap_or_else(|| "info".to_string());

        let log_format = std::env::var("MUNIBOT_LOG_FORMAT")
            .ok()
            .filter(|s| !s.is_empty())
            .or(toml.log_format)
            .unwrap_or_else(|| "pretty".to_string());

        let delay_scale = if no_delays {
            0.0
        } else {
            toml.delay_scale.unwrap_or(DEFAULT_DELAY_SCALE).max(0.0)
        };

        let fallback_department = toml
            .fallback_department
            .as_deref()
            .and_then(Department::from_str)
            .unwrap_or(Department::Gov);

        let catalog_overlay = std::env::var("MUNIBOT_CATALOG_OVERLAY")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .or(toml.catalog_overlay);

        let history_limit = toml.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

        Self {
            data_dir,
            log,
            log_format,
            delay_scale,
            fallback_department,
            catalog_overlay,
            history_limit,
        }
    }
}

fn default_data_dir() -> PathBuf {
    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support/munibot
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("munibot");
        }
    }
    #[cfg(target_os = "linux")]
    {
        // $XDG_DATA_HOME/munibot or ~/.local/share/munibot
        if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
            return PathBuf::from(xdg).join("munibot");
        }
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("munibot");
        }
    }
    #[cfg(target_os = "windows")]
    {
        // %APPDATA%\munibot
        if let Ok(appdata) = std::env::var("APPDATA") {
            return PathBuf::from(appdata).join("munibot");
        }
    }
    // Fallback
    PathBuf::from(".munibot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_toml() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = MunibotConfig::new(Some(dir.path().to_path_buf()), None, false);
        assert_eq!(config.log, "info");
        assert_eq!(config.log_format, "pretty");
        assert_eq!(config.delay_scale, DEFAULT_DELAY_SCALE);
        assert_eq!(config.fallback_department, Department::Gov);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn toml_overrides_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(
            dir.path().join("config.toml"),
            "log = \"debug\"\ndelay_scale = 0.5\nhistory_limit = 50\n",
        )
        .expect("write config");
        let config = MunibotConfig::new(Some(dir.path().to_path_buf()), None, false);
        assert_eq!(config.log, "debug");
        assert_eq!(config.delay_scale, 0.5);
        assert_eq!(config.history_limit, 50);
    }

    #[test]
    fn cli_beats_toml() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("config.toml"), "log = \"debug\"\n").expect("write config");
        let config =
            MunibotConfig::new(Some(dir.path().to_path_buf()), Some("trace".to_string()), false);
        assert_eq!(config.log, "trace");
    }

    #[test]
    fn no_delays_flag_zeroes_scale() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("config.toml"), "delay_scale = 2.0\n")
            .expect("write config");
        let config = MunibotConfig::new(Some(dir.path().to_path_buf()), None, true);
        assert_eq!(config.delay_scale, 0.0);
    }

    #[test]
    fn invalid_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        std::fs::write(dir.path().join("config.toml"), "log = [broken").expect("write config");
        let config = MunibotConfig::new(Some(dir.path().to_path_buf()), None, false);
        assert_eq!(config.log, "info");
    }
}
