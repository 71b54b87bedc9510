//! Centralized configuration for Rabbit.
//!
//! Goals:
//! - One place for tunables instead of scattered env lookups.
//! - RabbitConfig::from_env() reads RABBIT_* env vars on top of the defaults.
//! - CLI flags override env via the fluent setters.
//!
//! Defaults match the classic behavior: `items.csv` in the working directory, 100 items.

use std::fmt;
use std::path::PathBuf;

use crate::consts::{DATA_FILE, ENV_DATA_FILE, ENV_MAX_ITEMS, MAX_ITEMS};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RabbitConfig {
    /// Data file the store is loaded from and saved to.
    /// Env: RABBIT_DATA_FILE (default "items.csv")
    pub data_file: PathBuf,

    /// Upper bound on the number of items.
    /// Env: RABBIT_MAX_ITEMS (default 100)
    pub max_items: usize,
}

impl Default for RabbitConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DATA_FILE),
            max_items: MAX_ITEMS,
        }
    }
}

impl RabbitConfig {
    /// Defaults overlaid with environment variables. Invalid values are ignored.
    pub fn from_env() -> Self {
        Self::default().overlay(|k| std::env::var(k).ok())
    }

    /// Overlay values from an arbitrary key lookup (env in production, a map in tests).
    pub fn overlay<F: Fn(&str) -> Option<String>>(mut self, lookup: F) -> Self {
        if let Some(v) = lookup(ENV_DATA_FILE) {
            let s = v.trim();
            if !s.is_empty() {
                self.data_file = PathBuf::from(s);
            }
        }

        if let Some(v) = lookup(ENV_MAX_ITEMS) {
            if let Ok(n) = v.trim().parse::<usize>() {
                self.max_items = n;
            }
        }

        self
    }

    pub fn with_data_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_max_items(mut self, n: usize) -> Self {
        self.max_items = n;
        self
    }
}

impl fmt::Display for RabbitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RabbitConfig {{ data_file: {}, max_items: {} }}",
            self.data_file.display(),
            self.max_items
        )
    }
}
