use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub demo: DemoConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoConfig {
    /// ISO-8601 start value for the time selector; defaults to startup time.
    #[serde(default)]
    pub initial_time: Option<String>,
    #[serde(default = "default_examples")]
    pub examples: Vec<ExampleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleConfig {
    pub label: String,
    pub offset_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_iso: bool,
    #[serde(default = "default_true")]
    pub show_update_counts: bool,
}

fn example(label: &str, offset_secs: i64) -> ExampleConfig {
    ExampleConfig {
        label: label.to_string(),
        offset_secs,
    }
}

fn default_examples() -> Vec<ExampleConfig> {
    vec![
        example("5 seconds ago", 5),
        example("30 seconds ago", 30),
        example("2 minutes ago", 2 * 60),
        example("3 hours ago", 3 * 60 * 60),
        example("2 days ago", 2 * 24 * 60 * 60),
        example("3 months ago", 90 * 24 * 60 * 60),
        example("2 years ago", 2 * 365 * 24 * 60 * 60),
    ]
}
fn default_true() -> bool {
    true
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_time: None,
            examples: default_examples(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_iso: true,
            show_update_counts: true,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: AppConfig =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;
            return Ok(config);
        }

        // Search candidate paths in order
        let mut candidates = Vec::new();

        // 1. ~/.config/reltime/config.toml
        if let Some(home) = std::env::var_os("HOME") {
            candidates.push(PathBuf::from(home).join(".config/reltime/config.toml"));
        }

        // 2. Platform-specific path (macOS: ~/Library/Application Support/reltime/)
        if let Some(proj_dirs) = ProjectDirs::from("", "", "reltime") {
            candidates.push(proj_dirs.config_dir().join("config.toml"));
        }

        for config_path in &candidates {
            if config_path.exists() {
                let content = std::fs::read_to_string(config_path).with_context(|| {
                    format!("Failed to read config file: {}", config_path.display())
                })?;
                let config: AppConfig =
                    toml::from_str(&content).with_context(|| "Failed to parse config file")?;
                return Ok(config);
            }
        }

        Ok(AppConfig::default())
    }

    pub fn log_dir(&self) -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "reltime") {
            return proj_dirs.data_dir().join("logs");
        }
        PathBuf::from(".local/share/reltime/logs")
    }
}
