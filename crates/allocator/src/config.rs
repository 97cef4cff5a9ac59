use crate::constants::DEFAULT_MAX_TOTAL;
use crate::error::{AllocError, Result};
use crate::layout::PageLayout;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level settings file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub allocator: AllocatorConfig,
    #[serde(default)]
    pub layout: PageLayout,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// maximum number of problems on one paper
    pub max_total: u32,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_total: DEFAULT_MAX_TOTAL,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AllocError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AllocError::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.allocator.max_total == 0 {
            return Err(AllocError::Config(
                "allocator.max_total must be greater than 0".to_string(),
            ));
        }

        let layout = &self.layout;
        if layout.columns == 0 {
            return Err(AllocError::Config(
                "layout.columns must be at least 1".to_string(),
            ));
        }
        // NaN fails both comparisons
        if !(layout.page_height > 0.0) {
            return Err(AllocError::Config(format!(
                "layout.page_height must be positive, got {}",
                layout.page_height
            )));
        }
        if !(layout.item_gap >= 0.0) {
            return Err(AllocError::Config(format!(
                "layout.item_gap must not be negative, got {}",
                layout.item_gap
            )));
        }

        Ok(())
    }
}
