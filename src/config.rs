use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// x264 presets accepted for `encoder.preset`
pub const X264_PRESETS: [&str; 10] = [
    "ultrafast",
    "superfast",
    "veryfast",
    "faster",
    "fast",
    "medium",
    "slow",
    "slower",
    "veryslow",
    "placebo",
];

/// Main configuration for snapfilter
///
/// Kernel parameters are deliberately absent: filters always run with their
/// built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Export destination settings
    pub export: ExportConfig,

    /// External video encoder settings
    pub encoder: EncoderConfig,

    /// Still preview settings
    pub preview: PreviewConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.export.validate()?;
        self.encoder.validate()?;
        self.preview.validate()?;
        Ok(())
    }
}

/// Export destination configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory used when the caller does not name one
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<()> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "export.output_dir".to_string(),
                value: String::new()
            }.into());
        }
        Ok(())
    }
}

/// External encoder configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EncoderConfig {
    /// Binary name looked up on PATH, or an explicit path
    pub binary: String,

    /// Video codec passed to `-c:v`
    pub video_codec: String,

    /// Encoder speed preset
    pub preset: String,

    /// Constant rate factor (0-51, lower is better)
    pub crf: u8,

    /// Copy the audio stream instead of re-encoding it
    pub copy_audio: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            video_codec: "libx264".to_string(),
            preset: "veryfast".to_string(),
            crf: 22,
            copy_audio: true,
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "encoder.binary".to_string(),
                value: self.binary.clone()
            }.into());
        }

        if !X264_PRESETS.contains(&self.preset.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "encoder.preset".to_string(),
                value: self.preset.clone()
            }.into());
        }

        if self.crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "encoder.crf".to_string(),
                value: self.crf.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Still preview configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PreviewConfig {
    /// Maximum preview width in pixels
    pub max_width: u32,

    /// Maximum preview height in pixels
    pub max_height: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_width: 640,
            max_height: 360,
        }
    }
}

impl PreviewConfig {
    fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "preview.size".to_string(),
                value: format!("{}x{}", self.max_width, self.max_height)
            }.into());
        }
        Ok(())
    }
}
