//! Configuration file loading with precedence handling.

use crate::state::{Easing, ExpandOptions, ListenerTiming};
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SLIDEX_CONFIG";

/// Environment variable overriding the animation duration.
pub const ANIMATION_MS_ENV: &str = "SLIDEX_ANIMATION_MS";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file path contains invalid UTF-8 or cannot be resolved.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),

    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting has a value outside its domain.
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting that was rejected.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/slidex/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Expand/collapse animation length in milliseconds.
    #[serde(default)]
    pub animation_duration_ms: Option<i64>,

    /// Whether opening a row closes the previously open one.
    #[serde(default)]
    pub single_open: Option<bool>,

    /// Scroll freshly expanded panels into view.
    #[serde(default)]
    pub adjust_to_fit: Option<bool>,

    /// When listeners hear about transitions (`"dispatch"` or `"completion"`).
    #[serde(default)]
    pub listener_timing: Option<ListenerTiming>,

    /// Animation curve (`"linear"`, `"smooth-step"`, `"ease-in-out-cubic"`).
    #[serde(default)]
    pub easing: Option<Easing>,

    /// Number of rows in the demo list.
    #[serde(default)]
    pub rows: Option<usize>,

    /// Where the expand state is saved between runs.
    #[serde(default)]
    pub state_file_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Animation length.
    pub animation_duration_ms: u32,
    /// Single-open mode.
    pub single_open: bool,
    /// Scroll-into-view after expanding.
    pub adjust_to_fit: bool,
    /// Listener notification timing.
    pub listener_timing: ListenerTiming,
    /// Animation curve.
    pub easing: Easing,
    /// Rows in the demo list.
    pub rows: usize,
    /// Saved expand state location.
    pub state_file_path: PathBuf,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let options = ExpandOptions::default();
        Self {
            animation_duration_ms: options.animation_duration_ms,
            single_open: options.single_open,
            adjust_to_fit: options.adjust_to_fit,
            listener_timing: options.listener_timing,
            easing: options.easing,
            rows: 40,
            state_file_path: default_state_path(),
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Controller options described by this config.
    pub fn expand_options(&self) -> ExpandOptions {
        ExpandOptions {
            animation_duration_ms: self.animation_duration_ms,
            single_open: self.single_open,
            adjust_to_fit: self.adjust_to_fit,
            listener_timing: self.listener_timing,
            easing: self.easing,
        }
    }
}

/// Command-line overrides, each `None`/`false` when the flag was not given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--rows`
    pub rows: Option<usize>,
    /// `--duration`
    pub animation_duration_ms: Option<i64>,
    /// `--multi-open`
    pub multi_open: bool,
    /// `--no-adjust`
    pub no_adjust: bool,
    /// `--listener-timing`
    pub listener_timing: Option<ListenerTiming>,
}

fn state_file(name: &str) -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("slidex").join(name),
        None => PathBuf::from(name),
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/slidex/slidex.log` on Unix-like systems. Falls
/// back to the current directory if no state directory is known.
pub fn default_log_path() -> PathBuf {
    state_file("slidex.log")
}

/// Resolve default saved-state path, next to the log file.
pub fn default_state_path() -> PathBuf {
    state_file("expand-state.bin")
}

/// Resolve default config file path.
///
/// Returns `~/.config/slidex/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("slidex").join("config.toml"))
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `SLIDEX_CONFIG` environment variable
/// 3. Default path `~/.config/slidex/config.toml`
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        if env_path.is_empty() {
            return Err(ConfigError::InvalidPath(format!("{CONFIG_ENV} is empty")));
        }
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

fn validate_duration(field: &'static str, ms: i64) -> Result<u32, ConfigError> {
    if ms < 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("animation duration must not be negative, got {ms}"),
        });
    }
    u32::try_from(ms).map_err(|_| ConfigError::InvalidValue {
        field,
        reason: format!("animation duration {ms} ms is too large"),
    })
}

/// Merge config file into defaults to create resolved config.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for a negative animation duration.
pub fn merge_config(config_file: Option<ConfigFile>) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return Ok(defaults);
    };

    let animation_duration_ms = match config.animation_duration_ms {
        Some(ms) => validate_duration("animation_duration_ms", ms)?,
        None => defaults.animation_duration_ms,
    };

    Ok(ResolvedConfig {
        animation_duration_ms,
        single_open: config.single_open.unwrap_or(defaults.single_open),
        adjust_to_fit: config.adjust_to_fit.unwrap_or(defaults.adjust_to_fit),
        listener_timing: config.listener_timing.unwrap_or(defaults.listener_timing),
        easing: config.easing.unwrap_or(defaults.easing),
        rows: config.rows.unwrap_or(defaults.rows),
        state_file_path: config.state_file_path.unwrap_or(defaults.state_file_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    })
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `SLIDEX_ANIMATION_MS`: Override animation duration
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if the variable is not a
/// non-negative integer.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> Result<ResolvedConfig, ConfigError> {
    if let Ok(raw) = std::env::var(ANIMATION_MS_ENV) {
        let ms: i64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: ANIMATION_MS_ENV,
            reason: format!("expected milliseconds, got {raw:?}"),
        })?;
        config.animation_duration_ms = validate_duration(ANIMATION_MS_ENV, ms)?;
    }

    Ok(config)
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for a negative `--duration`.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    overrides: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(rows) = overrides.rows {
        config.rows = rows;
    }
    if let Some(ms) = overrides.animation_duration_ms {
        config.animation_duration_ms = validate_duration("--duration", ms)?;
    }
    if overrides.multi_open {
        config.single_open = false;
    }
    if overrides.no_adjust {
        config.adjust_to_fit = false;
    }
    if let Some(timing) = overrides.listener_timing {
        config.listener_timing = timing;
    }

    Ok(config)
}

/// Run the full precedence chain.
///
/// # Errors
///
/// Propagates any error from loading, merging, or overriding.
pub fn resolve(
    config_path: Option<PathBuf>,
    overrides: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    let merged = merge_config(file)?;
    let with_env = apply_env_overrides(merged)?;
    apply_cli_overrides(with_env, overrides)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
