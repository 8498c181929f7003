// src/config.rs

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

/// Tracking configuration, loaded from YAML by the owning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Number of recent fits averaged into the smoothed best fit.
    /// Small single-digit windows work well at ~30 fps; larger windows
    /// smooth more but lag behind real geometry changes.
    #[serde(default = "default_smoothing_window")]
    pub smoothing_window: usize,
}

fn default_smoothing_window() -> usize {
    5
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            smoothing_window: default_smoothing_window(),
        }
    }
}

impl TrackingConfig {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: TrackingConfig = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}
