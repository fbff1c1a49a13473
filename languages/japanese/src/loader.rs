use std::path::Path;

use kanjistat_core::{DictionaryLoader, LoadError, TableCache};

use crate::kanjidic::extract_record;
use crate::table::KanjiTable;
use crate::xml::for_each_element;

/// Parses KANJIDIC2 XML into a [`KanjiTable`]
#[derive(Debug, Default, Clone, Copy)]
pub struct KanjidicLoader;

impl DictionaryLoader for KanjidicLoader {
    type Table = KanjiTable;

    fn load_from_str(&self, source: &str) -> Result<KanjiTable, LoadError> {
        let mut records = Vec::new();
        let mut ungraded = 0usize;

        let entries = for_each_element(source, "character", |entry| {
            match extract_record(&entry)? {
                Some(record) => records.push(record),
                None => ungraded += 1,
            }
            Ok(())
        })?;

        let table = KanjiTable::from_records(records);
        tracing::info!(
            "Loaded {} graded characters from {} entries ({} without a grade)",
            table.len(),
            entries,
            ungraded
        );
        Ok(table)
    }

    fn supported_formats(&self) -> Vec<String> {
        vec!["kanjidic2".to_string()]
    }
}

impl KanjidicLoader {
    /// Load the table, going through `cache` when one is given.
    ///
    /// With `rebuild` set the source is always parsed and the cache rewritten.
    pub fn load(
        &self,
        source: &Path,
        cache: Option<&TableCache>,
        rebuild: bool,
    ) -> Result<KanjiTable, LoadError> {
        match cache {
            Some(cache) if rebuild => cache.rebuild(self, source),
            Some(cache) => cache.load_or_build(self, source),
            None => self.load_from_file(source),
        }
    }
}
