use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const PICK_COUNT: usize = 5;
pub const MIN_NUMBER: u32 = 1;
pub const MAX_NUMBER: u32 = 90;
pub const DEFAULT_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_DURATION_MS: u64 = 10_000;

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SimConfig {
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default)]
    pub user_numbers: Option<Vec<u32>>,
    #[serde(default)]
    pub max_rounds: Option<u64>,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_numbers: None,
            max_rounds: None,
            duration_ms: DEFAULT_DURATION_MS,
            draw: DrawConfig::default(),
            seed: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum DrawConfig {
    #[default]
    Secure,
    Seeded,
}

impl DrawConfig {
    pub fn label_with_seed(&self, seed: Option<u64>) -> String {
        match (self, seed) {
            (DrawConfig::Seeded, Some(seed)) => format!("seeded({})", seed),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for DrawConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawConfig::Secure => write!(f, "secure"),
            DrawConfig::Seeded => write!(f, "seeded"),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormatArg {
    #[default]
    Human,
    Summary,
    Json,
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}
