use anyhow::Result;
use serde::{Deserialize, Serialize};
use slabcast_geometry::{CastOptions, CornerNormal, NegativeTime, Vec2};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/slabcast.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CastConfig {
    /// `"reject"` drops contacts that start inside a rectangle; `"accept"` keeps them.
    pub negative_time: NegativeTime,
    pub corner_normal: CornerNormal,
    /// Ray origin used by scenarios that do not set their own.
    pub anchor: [f32; 2],
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            negative_time: NegativeTime::Reject,
            corner_normal: CornerNormal::XAxis,
            anchor: [0.0, 0.0],
        }
    }
}

impl CastConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<CastConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    CastConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                CastConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }

    pub fn cast_options(&self) -> CastOptions {
        CastOptions {
            negative_time: self.negative_time,
            corner_normal: self.corner_normal,
        }
    }

    pub fn anchor(&self) -> Vec2 {
        Vec2::from_array(self.anchor)
    }
}
