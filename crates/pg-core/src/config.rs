//! Configuration for a greeting run.

use std::path::PathBuf;

use crate::history::DEFAULT_HISTORY_SIZE;
use crate::selector::{DEFAULT_MAX_ID, DEFAULT_REDRAWS, Selector};

/// File locations, history bounds and selection settings for one run.
#[derive(Debug, Clone)]
pub struct GreeterConfig {
    /// The README that is overwritten with the greeting.
    pub readme_path: PathBuf,
    /// The JSON history file.
    pub history_path: PathBuf,
    /// Maximum number of history entries kept.
    pub history_size: usize,
    /// Highest id the selector may draw.
    pub max_id: u32,
    /// Redraws allowed when a draw was picked recently.
    pub redraws: u32,
    /// RNG seed for reproducible runs. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GreeterConfig {
    fn default() -> Self {
        Self {
            readme_path: PathBuf::from("./README.md"),
            history_path: PathBuf::from("./pokemon_history.json"),
            history_size: DEFAULT_HISTORY_SIZE,
            max_id: DEFAULT_MAX_ID,
            redraws: DEFAULT_REDRAWS,
            seed: None,
        }
    }
}

impl GreeterConfig {
    /// Set the README path.
    pub fn with_readme(mut self, path: impl Into<PathBuf>) -> Self {
        self.readme_path = path.into();
        self
    }

    /// Set the history file path.
    pub fn with_history(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Set the history capacity.
    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Set the highest selectable id (at least 1).
    pub fn with_max_id(mut self, max_id: u32) -> Self {
        self.max_id = max_id.max(1);
        self
    }

    /// Set the redraw budget.
    pub fn with_redraws(mut self, redraws: u32) -> Self {
        self.redraws = redraws;
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// The selector described by this config.
    pub fn selector(&self) -> Selector {
        Selector::new(self.max_id).with_redraws(self.redraws)
    }
}
