use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Largest width/height a host may request.
pub const MAX_DIMENSION: u32 = 4096;

/// Settings snapshot for one animation source. Always delivered whole;
/// hosts merge partial edits before calling `configure`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Animation file location. Empty means unset.
    #[serde(rename = "file")]
    pub source_path: String,
    /// Output width, 0 = take the animation's own width.
    #[serde(rename = "width")]
    pub requested_width: u32,
    /// Output height, 0 = take the animation's own height.
    #[serde(rename = "height")]
    pub requested_height: u32,
    pub keep_aspect_ratio: bool,
    pub looping: bool,
    /// Hide the last frame once playback has ended.
    pub clear_on_end: bool,
    /// Only start playing when the source becomes active.
    pub restart_on_activate: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source_path: String::new(),
            requested_width: 0,
            requested_height: 0,
            keep_aspect_ratio: true,
            looping: false,
            clear_on_end: false,
            restart_on_activate: false,
        }
    }
}

impl PlayerConfig {
    pub fn with_source(path: impl Into<String>) -> Self {
        Self {
            source_path: path.into(),
            ..Self::default()
        }
    }

    /// Read a config from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded player config from {}", path.display());
        Ok(config.sanitized())
    }

    pub fn has_source(&self) -> bool {
        !self.source_path.is_empty()
    }

    pub fn requested_size(&self) -> (u32, u32) {
        (self.requested_width, self.requested_height)
    }

    /// Clamp requested dimensions into `0..=MAX_DIMENSION`.
    pub fn sanitized(mut self) -> Self {
        if self.requested_width > MAX_DIMENSION || self.requested_height > MAX_DIMENSION {
            log::warn!(
                "Requested size {}x{} exceeds {MAX_DIMENSION}, clamping",
                self.requested_width,
                self.requested_height
            );
        }
        self.requested_width = self.requested_width.min(MAX_DIMENSION);
        self.requested_height = self.requested_height.min(MAX_DIMENSION);
        self
    }
}
