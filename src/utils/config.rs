use crate::core::DEFAULT_TIME_BOUND_S;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Display options of the trajectory panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Initial map center latitude (decimal degrees)
    pub center_lat: f64,
    /// Initial map center longitude (decimal degrees)
    pub center_lon: f64,
    /// Optional extra tile layer URL template, empty for none
    pub tile_url: String,
    /// Initial map zoom level
    pub zoom_level: u8,
    /// Show a marker at each selected device's most recent fix
    pub show_last_point: bool,
    /// Show the windowed trajectory lines
    pub show_last_line: bool,
    /// Half-width of the time window around the pivot (seconds)
    pub time_bound: u64,
    /// IANA zone name used for time labels
    pub timezone: String,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            center_lat: 48.262725,
            center_lon: 11.66725,
            tile_url: String::new(),
            zoom_level: 18,
            show_last_point: true,
            show_last_line: false,
            time_bound: DEFAULT_TIME_BOUND_S,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl PanelOptions {
    /// Parsed label zone. Falls back to UTC for a name that slipped past
    /// validation.
    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(Tz::UTC)
    }
}

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },

    #[error("I/O error: {message}")]
    IoError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },
}

/// Outcome of validating a set of options
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

const MAX_ZOOM_LEVEL: u8 = 28;
const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

fn invalid(parameter: &str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Checks every option and collects all problems rather than stopping at
/// the first one.
pub fn validate_options(options: &PanelOptions) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !(-90.0..=90.0).contains(&options.center_lat) {
        errors.push(invalid("center_lat", options.center_lat, "must be within [-90, 90]"));
    }
    if !(-180.0..=180.0).contains(&options.center_lon) {
        errors.push(invalid("center_lon", options.center_lon, "must be within [-180, 180]"));
    }
    if options.zoom_level > MAX_ZOOM_LEVEL {
        errors.push(invalid("zoom_level", options.zoom_level, "must be within [0, 28]"));
    }
    if options.timezone.parse::<Tz>().is_err() {
        errors.push(invalid("timezone", &options.timezone, "not a known IANA time zone"));
    }
    if options.show_last_point && options.show_last_line {
        errors.push(invalid("show_last_line", true, "cannot be combined with show_last_point"));
    }

    if options.time_bound == 0 {
        warnings.push("time_bound is 0, only samples exactly at the pivot are shown".to_string());
    }
    if !options.tile_url.is_empty() && !options.tile_url.contains("{z}") {
        warnings.push(format!("tile_url '{}' has no {{z}} placeholder", options.tile_url));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

/// Owns the panel options and their backing file
pub struct OptionsManager {
    options: PanelOptions,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl OptionsManager {
    pub fn new() -> Self {
        Self {
            options: PanelOptions::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    /// Replace all options at once after validation
    pub fn update_options(&mut self, options: PanelOptions) -> Result<(), ConfigError> {
        Self::ensure_valid(&options)?;
        self.options = options;
        self.is_modified = true;
        Ok(())
    }

    /// Load options from a JSON file. Missing keys take their defaults.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            message: format!("Failed to read config file '{}': {}", path_str, e),
        })?;

        let options: PanelOptions = serde_json::from_str(&content).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to parse config file '{}': {}", path_str, e),
        })?;

        Self::ensure_valid(&options)?;

        tracing::info!(path = %path_str, "loaded panel options");
        self.options = options;
        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let path_str = path.as_ref().to_string_lossy().to_string();

        let content = serde_json::to_string_pretty(&self.options).map_err(|e| ConfigError::SerializationError {
            message: format!("Failed to serialize options: {}", e),
        })?;

        fs::write(&path, content).map_err(|e| ConfigError::IoError {
            message: format!("Failed to write config file '{}': {}", path_str, e),
        })?;

        self.config_file_path = Some(path_str);
        self.is_modified = false;
        Ok(())
    }

    /// Save to the file the options were last loaded from or saved to
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::IoError {
                message: "No file path set for saving options".to_string(),
            }),
        }
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn set_center(&mut self, lat: f64, lon: f64) -> Result<(), ConfigError> {
        let options = PanelOptions { center_lat: lat, center_lon: lon, ..self.options.clone() };
        self.update_options(options)
    }

    pub fn set_zoom_level(&mut self, zoom_level: u8) -> Result<(), ConfigError> {
        let options = PanelOptions { zoom_level, ..self.options.clone() };
        self.update_options(options)
    }

    pub fn set_time_bound(&mut self, time_bound: u64) -> Result<(), ConfigError> {
        let options = PanelOptions { time_bound, ..self.options.clone() };
        self.update_options(options)
    }

    pub fn set_tile_url(&mut self, tile_url: impl Into<String>) -> Result<(), ConfigError> {
        let options = PanelOptions { tile_url: tile_url.into(), ..self.options.clone() };
        self.update_options(options)
    }

    /// Toggle the latest-point layer. Turning it on turns the line layer off.
    pub fn toggle_last_point(&mut self) -> bool {
        self.options.show_last_point = !self.options.show_last_point;
        if self.options.show_last_point {
            self.options.show_last_line = false;
        }
        self.is_modified = true;
        self.options.show_last_point
    }

    /// Toggle the line layer. Turning it on turns the latest-point layer off.
    pub fn toggle_last_line(&mut self) -> bool {
        self.options.show_last_line = !self.options.show_last_line;
        if self.options.show_last_line {
            self.options.show_last_point = false;
        }
        self.is_modified = true;
        self.options.show_last_line
    }

    fn ensure_valid(options: &PanelOptions) -> Result<(), ConfigError> {
        let validation = validate_options(options);
        for warning in &validation.warnings {
            tracing::warn!(%warning, "panel option warning");
        }
        match validation.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for OptionsManager {
    fn default() -> Self {
        Self::new()
    }
}
