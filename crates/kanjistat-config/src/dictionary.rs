use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_source_path() -> PathBuf {
    PathBuf::from("kanjidic2.xml")
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("kanjidic.cache.json")
}

fn default_use_cache() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct DictionaryConfig {
    /// KANJIDIC2 XML file
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    /// Parsed table cache, written on first load
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
}

impl DictionaryConfig {
    pub fn new() -> Self {
        let source_path = env::var("KANJIDIC_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_source_path());

        let cache_path = env::var("KANJISTAT_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_cache_path());

        Self {
            source_path,
            cache_path,
            use_cache: default_use_cache(),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            source_path: default_source_path(),
            cache_path: default_cache_path(),
            use_cache: default_use_cache(),
        }
    }
}
