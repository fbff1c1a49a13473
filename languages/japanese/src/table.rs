use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kanjidic::CharacterRecord;

/// Graded characters in dictionary order, indexed by literal.
///
/// Built once and never mutated afterwards, so a shared reference can be
/// handed to any number of readers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KanjiTable {
    records: Vec<CharacterRecord>,
    index: HashMap<String, usize>,
}

impl KanjiTable {
    /// Build from records in source order.
    ///
    /// A repeated literal keeps the position of its first occurrence and the
    /// contents of its last.
    pub fn from_records(records: impl IntoIterator<Item = CharacterRecord>) -> Self {
        let mut table = Self::default();

        for record in records {
            match table.index.get(&record.literal) {
                Some(&position) => {
                    tracing::warn!("Duplicate entry for {}, keeping the later one", record.literal);
                    table.records[position] = record;
                }
                None => {
                    table.index.insert(record.literal.clone(), table.records.len());
                    table.records.push(record);
                }
            }
        }

        table
    }

    pub fn get(&self, literal: &str) -> Option<&CharacterRecord> {
        self.index.get(literal).map(|&i| &self.records[i])
    }

    pub fn get_char(&self, c: char) -> Option<&CharacterRecord> {
        let mut buf = [0u8; 4];
        self.get(c.encode_utf8(&mut buf))
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.index.contains_key(literal)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.records.iter()
    }

    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.literal.as_str())
    }
}

impl FromIterator<CharacterRecord> for KanjiTable {
    fn from_iter<I: IntoIterator<Item = CharacterRecord>>(iter: I) -> Self {
        Self::from_records(iter)
    }
}

// Persisted as the ordered record list; the index is rebuilt on load
impl Serialize for KanjiTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.records.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KanjiTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CharacterRecord>::deserialize(deserializer).map(Self::from_records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(literal: &str, grade: u8) -> CharacterRecord {
        CharacterRecord {
            literal: literal.to_string(),
            grade,
            frequency_rank: None,
            jlpt_level: None,
            reference_ids: Default::default(),
            on_readings: vec![],
            kun_readings: vec![],
            meanings: vec![],
            name_readings: vec![],
        }
    }

    #[test]
    fn test_lookup_by_str_and_char() {
        let table = KanjiTable::from_records([record("火", 1), record("星", 2)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("星").map(|r| r.grade), Some(2));
        assert_eq!(table.get_char('火').map(|r| r.grade), Some(1));
        assert!(table.get_char('水').is_none());
        assert!(table.contains("火"));
    }

    #[test]
    fn test_duplicate_keeps_first_position_and_last_value() {
        let table: KanjiTable = [record("火", 1), record("星", 2), record("火", 3)]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.literals().collect::<Vec<_>>(), vec!["火", "星"]);
        assert_eq!(table.get("火").map(|r| r.grade), Some(3));
    }

    #[test]
    fn test_serde_round_trip_preserves_order() {
        let table = KanjiTable::from_records([record("星", 2), record("火", 1), record("時", 2)]);
        let json = serde_json::to_string(&table).unwrap();
        let restored: KanjiTable = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, table);
        assert_eq!(
            restored.literals().collect::<Vec<_>>(),
            vec!["星", "火", "時"]
        );
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KanjiTable>();
    }
}
