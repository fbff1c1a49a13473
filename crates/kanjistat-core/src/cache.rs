use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryLoader;
use crate::error::LoadError;

/// Bumped whenever the persisted table layout changes
pub const CACHE_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CacheFile<T> {
    format_version: u32,
    records: T,
}

/// On-disk copy of a parsed dictionary table.
///
/// The cache is trusted as-is: it is never compared against the source it
/// was built from. Delete the file (or use [`TableCache::rebuild`]) after
/// updating the source.
#[derive(Debug, Clone)]
pub struct TableCache {
    path: PathBuf,
}

impl TableCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read a previously stored table
    pub fn load<T: DeserializeOwned>(&self) -> Result<T, LoadError> {
        let file = File::open(&self.path)?;
        let cached: CacheFile<T> = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| LoadError::Cache(format!("{}: {e}", self.path.display())))?;

        if cached.format_version != CACHE_FORMAT_VERSION {
            return Err(LoadError::Cache(format!(
                "{}: format version {} is not supported (expected {})",
                self.path.display(),
                cached.format_version,
                CACHE_FORMAT_VERSION
            )));
        }

        Ok(cached.records)
    }

    /// Write the table, replacing any existing cache
    pub fn store<T: Serialize>(&self, table: &T) -> Result<(), LoadError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write next to the target and rename so readers never see a partial file
        let tmp = self.path.with_extension("tmp");
        if let Err(e) = write_cache_file(&tmp, table) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, &self.path)?;

        tracing::info!("Wrote dictionary cache: {}", self.path.display());
        Ok(())
    }

    /// Return the cached table if present, otherwise parse the source and cache it
    pub fn load_or_build<L>(&self, loader: &L, source: &Path) -> Result<L::Table, LoadError>
    where
        L: DictionaryLoader,
        L::Table: Serialize + DeserializeOwned,
    {
        if self.exists() {
            tracing::info!("Loading dictionary from cache: {}", self.path.display());
            return self.load();
        }

        tracing::info!("No cache at {}, parsing source", self.path.display());
        self.rebuild(loader, source)
    }

    /// Parse the source unconditionally and overwrite the cache
    pub fn rebuild<L>(&self, loader: &L, source: &Path) -> Result<L::Table, LoadError>
    where
        L: DictionaryLoader,
        L::Table: Serialize,
    {
        let table = loader.load_from_file(source)?;
        self.store(&table)?;
        Ok(table)
    }
}

fn write_cache_file<T: Serialize>(path: &Path, table: &T) -> Result<(), LoadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    let cached = CacheFile {
        format_version: CACHE_FORMAT_VERSION,
        records: table,
    };
    serde_json::to_writer(&mut writer, &cached)
        .map_err(|e| LoadError::Cache(format!("{}: {e}", path.display())))?;
    writer.flush()?;
    Ok(())
}
