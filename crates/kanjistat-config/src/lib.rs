use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use self::analysis::AnalysisConfig;
use self::dictionary::DictionaryConfig;
use self::logging::LogConfig;

pub mod analysis;
pub mod dictionary;
pub mod logging;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub dictionary: DictionaryConfig,
    pub analysis: AnalysisConfig,
    pub log: LogConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Config {
            dictionary: DictionaryConfig::new(),
            analysis: AnalysisConfig::default(),
            log: LogConfig::new(),
        }
    }

    /// Load a JSON profile; sections or fields left out take their defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        tracing::info!("Loading config: {}", path.display());
        let file =
            File::open(path).with_context(|| format!("opening config {}", path.display()))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` if given, otherwise fall back to the environment
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::new()),
        }
    }
}
