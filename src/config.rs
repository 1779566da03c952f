// src/config.rs
//! Configuration management with per-user file storage

use crate::error::{CodecError, Result};
use crate::latlong::MAX_AMBIGUITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub ambiguity: u8,              // 0-4, digits blanked in APRS output
    pub output: String,             // "text", "json"
    pub serial_port: Option<String>,
    pub serial_baudrate: Option<u32>,
    pub log_level: String,          // tracing filter directive
    pub report_diagnostics: bool,   // forward advisories to the log
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ambiguity: 0,
            output: "text".to_string(),
            serial_port: None,
            serial_baudrate: Some(4800),
            log_level: "info".to_string(),
            report_diagnostics: true,
        }
    }
}

impl CodecConfig {
    /// Load the per-user config file, falling back to defaults if it is
    /// unreadable or invalid. The error is returned so the caller can log it
    /// once logging is set up.
    pub fn load_or_default() -> (Self, Option<CodecError>) {
        match Self::get_config_path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn load_or_default_from(path: &Path) -> (Self, Option<CodecError>) {
        match Self::load_from(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load configuration from a specific file, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| CodecError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the per-user config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CodecError::Config(format!("Failed to create config directory: {}", e)))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CodecError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| CodecError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Reject values the encoders would silently reinterpret
    pub fn validate(&self) -> Result<()> {
        if self.ambiguity > MAX_AMBIGUITY {
            return Err(CodecError::Config(format!(
                "ambiguity must be 0 to {}, got {}",
                MAX_AMBIGUITY, self.ambiguity
            )));
        }
        if self.output != "text" && self.output != "json" {
            return Err(CodecError::Config(format!(
                "output must be \"text\" or \"json\", got {:?}",
                self.output
            )));
        }
        Ok(())
    }

    /// Get config file path
    pub fn get_config_path() -> Result<PathBuf> {
        #[cfg(windows)]
        let base = std::env::var("APPDATA")
            .map(PathBuf::from)
            .map_err(|_| CodecError::Config("APPDATA environment variable not set".to_string()))?;

        #[cfg(not(windows))]
        let base = std::env::var("HOME")
            .map(|home| PathBuf::from(home).join(".config"))
            .map_err(|_| CodecError::Config("HOME environment variable not set".to_string()))?;

        Ok(base.join("aprs-latlong").join("config.json"))
    }

    /// Update serial port settings
    pub fn update_serial(&mut self, port: String, baudrate: u32) {
        self.serial_port = Some(port);
        self.serial_baudrate = Some(baudrate);
    }

    /// Update position ambiguity, saturating at the highest level
    pub fn update_ambiguity(&mut self, ambiguity: u8) {
        self.ambiguity = ambiguity.min(MAX_AMBIGUITY);
    }

    pub fn wants_json(&self) -> bool {
        self.output == "json"
    }
}
