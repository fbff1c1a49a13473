use std::path::Path;

use crate::error::LoadError;

/// Builds a dictionary table from a source document
pub trait DictionaryLoader {
    /// The table produced by this loader
    type Table;

    /// Parse a complete source document held in memory
    fn load_from_str(&self, source: &str) -> Result<Self::Table, LoadError>;

    /// Read and parse a source document from disk
    fn load_from_file(&self, path: &Path) -> Result<Self::Table, LoadError> {
        tracing::info!(
            "Reading dictionary source: {} (formats: {})",
            path.display(),
            self.supported_formats().join(", ")
        );
        let bytes = std::fs::read(path)?;
        let source = String::from_utf8(bytes)
            .map_err(|e| LoadError::MalformedSource(format!("{}: {e}", path.display())))?;
        self.load_from_str(&source)
    }

    /// Supported file formats
    fn supported_formats(&self) -> Vec<String>;
}
