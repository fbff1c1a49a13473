use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use kanjistat_core::stats::{self, StatSummary, StatsError};
use serde::Serialize;

use crate::filter::in_scope_chars;
use crate::frequency::FrequencyLevel;
use crate::kanjidic::CharacterRecord;
use crate::table::KanjiTable;

/// Numeric attribute of a character that statistics can be taken over
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Grade,
    Jlpt,
    Frequency,
}

impl Attribute {
    pub const ALL: [Attribute; 3] = [Attribute::Grade, Attribute::Jlpt, Attribute::Frequency];

    /// The attribute's value, `None` when the dictionary has none
    pub fn value(&self, record: &CharacterRecord) -> Option<f64> {
        match self {
            Attribute::Grade => Some(f64::from(record.grade)),
            Attribute::Jlpt => record.jlpt_level.map(f64::from),
            Attribute::Frequency => record.frequency_rank.map(f64::from),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Grade => "grade",
            Attribute::Jlpt => "jlpt",
            Attribute::Frequency => "freq",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Grade => "Grade Level",
            Attribute::Jlpt => "JLPT Level",
            Attribute::Frequency => "Character Frequency",
        }
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grade" => Ok(Attribute::Grade),
            "jlpt" => Ok(Attribute::Jlpt),
            "freq" | "frequency" => Ok(Attribute::Frequency),
            other => Err(format!(
                "unknown attribute `{other}` (expected grade, jlpt or freq)"
            )),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values of `attribute` for each in-scope character of `text`, in text order.
///
/// Characters missing from the table or without the attribute are skipped.
pub fn attribute_values(text: &str, table: &KanjiTable, attribute: Attribute) -> Vec<f64> {
    in_scope_chars(text)
        .filter_map(|c| table.get_char(c))
        .filter_map(|record| attribute.value(record))
        .collect()
}

pub fn aggregate(
    text: &str,
    table: &KanjiTable,
    attribute: Attribute,
) -> Result<StatSummary, StatsError> {
    stats::summarize(&attribute_values(text, table, attribute))
}

/// `(x, y)` per in-scope character where both attributes are available
pub fn attribute_pairs(
    text: &str,
    table: &KanjiTable,
    x: Attribute,
    y: Attribute,
) -> Vec<(f64, f64)> {
    in_scope_chars(text)
        .filter_map(|c| table.get_char(c))
        .filter_map(|record| Some((x.value(record)?, y.value(record)?)))
        .collect()
}

/// Correlation between two attributes across the characters of `text`
pub fn correlate(
    text: &str,
    table: &KanjiTable,
    x: Attribute,
    y: Attribute,
) -> Result<f64, StatsError> {
    stats::correlation(&attribute_pairs(text, table, x, y))
}

/// Everything computed for one text.
///
/// Each statistic carries its own outcome, so a text with no JLPT-ranked
/// characters still reports its grade statistics.
#[derive(Debug, Clone)]
pub struct TextReport {
    pub name: String,
    /// Characters left after filtering
    pub in_scope: usize,
    /// In-scope characters found in the table
    pub known: usize,
    pub distinct_known: usize,
    pub frequency_bands: BTreeMap<FrequencyLevel, usize>,
    pub stats: Vec<(Attribute, Result<StatSummary, StatsError>)>,
    pub correlation: Option<((Attribute, Attribute), Result<f64, StatsError>)>,
}

impl TextReport {
    pub fn analyze(
        name: impl Into<String>,
        text: &str,
        table: &KanjiTable,
        attributes: &[Attribute],
        correlation: Option<(Attribute, Attribute)>,
    ) -> Self {
        let name = name.into();

        let mut in_scope = 0;
        let mut known = Vec::new();
        for c in in_scope_chars(text) {
            in_scope += 1;
            if let Some(record) = table.get_char(c) {
                known.push(record);
            }
        }

        let distinct_known = known
            .iter()
            .map(|r| r.literal.as_str())
            .collect::<HashSet<_>>()
            .len();

        let mut frequency_bands = BTreeMap::new();
        for record in &known {
            *frequency_bands.entry(record.frequency_level()).or_insert(0) += 1;
        }

        let stats = attributes
            .iter()
            .map(|&attribute| {
                let values: Vec<f64> = known.iter().filter_map(|r| attribute.value(r)).collect();
                let outcome = stats::summarize(&values);
                if let Err(e) = &outcome {
                    tracing::debug!("{name}: no {attribute} statistics: {e}");
                }
                (attribute, outcome)
            })
            .collect();

        let correlation =
            correlation.map(|(x, y)| ((x, y), correlate(text, table, x, y)));

        Self {
            name,
            in_scope,
            known: known.len(),
            distinct_known,
            frequency_bands,
            stats,
            correlation,
        }
    }

    pub fn stat(&self, attribute: Attribute) -> Option<&Result<StatSummary, StatsError>> {
        self.stats
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, outcome)| outcome)
    }
}
