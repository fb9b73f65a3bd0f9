use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::agent::registry::DuplicatePolicy;

/// Main agentctl configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Root of the `<phase>/<id>.md` profile tree
    pub profiles_dir: PathBuf,
    pub log_level: LogLevel,
    pub duplicates: DuplicatePolicy,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub max_tokens: u32,
    pub base_url: String,
    /// Environment variable (or `.env` key) holding the API key
    pub api_key_env: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from("./agents/profiles"),
            log_level: LogLevel::default(),
            duplicates: DuplicatePolicy::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "claude-opus-4-1".to_string(),
            max_tokens: 4096,
            base_url: "https://api.anthropic.com".to_string(),
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var("AGENTCTL_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from AGENTCTL_CONFIG: {}", e);
                    }
                }
            }
        }

        // AGENTCTL_DIR, then ~/.config/agentctl, then ./agentctl.yaml (for development)
        let candidates = Self::search_paths(std::env::var_os("AGENTCTL_DIR").map(PathBuf::from), dirs::config_dir());
        if let Some(config) = Self::load_first(&candidates) {
            return Ok(config);
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Config file locations below the env overrides, in lookup order
    fn search_paths(agentctl_dir: Option<PathBuf>, config_dir: Option<PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = agentctl_dir {
            paths.push(dir.join("agentctl.yaml"));
        }
        if let Some(dir) = config_dir {
            paths.push(dir.join("agentctl").join("agentctl.yaml"));
        }
        paths.push(PathBuf::from("agentctl.yaml"));
        paths
    }

    /// First existing path that parses; broken files are logged and skipped
    fn load_first(paths: &[PathBuf]) -> Option<Self> {
        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return Some(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", path.display(), e);
                }
            }
        }
        None
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Directory holding agentctl.yaml and the optional .env credential file
    pub fn agentctl_dir() -> PathBuf {
        std::env::var("AGENTCTL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("agentctl"))
    }

    /// Profiles root with `~` and env vars expanded
    pub fn profiles_root(&self) -> PathBuf {
        Self::expand_path(&self.profiles_dir)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
