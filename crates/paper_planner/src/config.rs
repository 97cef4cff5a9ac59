use crate::error::{PlannerError, Result};
use std::{env, path::PathBuf};

const ENV_OUTPUT_DIR: &str = "PAPER_PLANNER_OUTPUT_DIR";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub output_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(output_dir) = env::var(ENV_OUTPUT_DIR)
            && !output_dir.trim().is_empty()
        {
            let path = PathBuf::from(output_dir);

            // If the path already exists but is not a directory, reject early.
            if path.exists() && !path.is_dir() {
                return Err(PlannerError::InvalidConfiguration(format!(
                    "Output path is not a directory: {}",
                    path.display()
                )));
            }
            config.output_dir = Some(path);
        }
        Ok(config)
    }
}
