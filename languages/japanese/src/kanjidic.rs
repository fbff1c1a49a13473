use std::collections::BTreeMap;

use kanjistat_core::LoadError;
use serde::{Deserialize, Serialize};

use crate::frequency::FrequencyLevel;
use crate::jlpt::JlptLevel;
use crate::xml::Element;

/// Classical dictionary numbering schemes kept from `<dic_number>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReferenceCatalog {
    /// "Modern Reader's Japanese-English Character Dictionary" (`nelson_c`)
    NelsonClassic,
    /// "Essential Kanji" key number (`oneill_kk`)
    OneillKanjiKey,
}

impl ReferenceCatalog {
    /// Map a KANJIDIC2 `dr_type` attribute; other schemes are not kept
    pub fn from_dr_type(dr_type: &str) -> Option<Self> {
        match dr_type {
            "nelson_c" => Some(ReferenceCatalog::NelsonClassic),
            "oneill_kk" => Some(ReferenceCatalog::OneillKanjiKey),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceCatalog::NelsonClassic => "Nelson",
            ReferenceCatalog::OneillKanjiKey => "O'Neill",
        }
    }
}

/// One graded KANJIDIC2 character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub literal: String,
    pub grade: u8,
    /// Rank among the 2500 most used characters (lower = more common)
    pub frequency_rank: Option<u32>,
    /// JLPT level as recorded in the dictionary (1 = hardest)
    pub jlpt_level: Option<u8>,
    #[serde(default)]
    pub reference_ids: BTreeMap<ReferenceCatalog, String>,
    pub on_readings: Vec<String>,
    pub kun_readings: Vec<String>,
    pub meanings: Vec<String>,
    pub name_readings: Vec<String>,
}

impl CharacterRecord {
    pub fn jlpt(&self) -> Option<JlptLevel> {
        self.jlpt_level.and_then(JlptLevel::from_number)
    }

    pub fn frequency_level(&self) -> FrequencyLevel {
        FrequencyLevel::from_rank(self.frequency_rank)
    }

    pub fn reference_id(&self, catalog: ReferenceCatalog) -> Option<&str> {
        self.reference_ids.get(&catalog).map(String::as_str)
    }
}

/// Build a record from one `<character>` element.
///
/// Returns `Ok(None)` for characters without a school grade; those are out of
/// scope. Graded characters must carry `<literal>` and a
/// `<reading_meaning>` with at least one `<rmgroup>`.
pub fn extract_record(entry: &Element) -> Result<Option<CharacterRecord>, LoadError> {
    let Some(misc) = entry.child("misc") else {
        return Ok(None);
    };
    let Some(grade) = misc.child_text("grade") else {
        return Ok(None);
    };

    let literal = entry
        .child_text("literal")
        .filter(|l| !l.is_empty())
        .ok_or_else(|| LoadError::field("<unknown>", "literal"))?;

    let grade = grade
        .parse::<u8>()
        .map_err(|_| LoadError::field(literal, "grade"))?;

    // Missing or unparsable values mean "not available"
    let frequency_rank = misc.child_text("freq").and_then(|t| t.parse().ok());
    let jlpt_level = misc.child_text("jlpt").and_then(|t| t.parse().ok());

    let mut reference_ids = BTreeMap::new();
    if let Some(dic_number) = entry.child("dic_number") {
        for dic_ref in dic_number.children_named("dic_ref") {
            let catalog = dic_ref.attr("dr_type").and_then(ReferenceCatalog::from_dr_type);
            if let Some(catalog) = catalog {
                reference_ids.insert(catalog, dic_ref.text.trim().to_string());
            }
        }
    }

    let reading_meaning = entry
        .child("reading_meaning")
        .ok_or_else(|| LoadError::field(literal, "reading_meaning"))?;
    let rmgroup = reading_meaning
        .child("rmgroup")
        .ok_or_else(|| LoadError::field(literal, "reading_meaning/rmgroup"))?;

    let mut on_readings = Vec::new();
    let mut kun_readings = Vec::new();
    let mut meanings = Vec::new();

    for child in &rmgroup.children {
        let text = child.text.trim().to_string();
        match child.attr("r_type") {
            Some("ja_on") => on_readings.push(text),
            Some("ja_kun") => kun_readings.push(text),
            // Non-English glosses carry `m_lang`
            _ if child.name == "meaning" && !child.has_attributes() => meanings.push(text),
            _ => {}
        }
    }

    // Nanori sit beside the rmgroups, not inside them
    let name_readings = reading_meaning
        .children_named("nanori")
        .map(|n| n.text.trim().to_string())
        .collect();

    Ok(Some(CharacterRecord {
        literal: literal.to_string(),
        grade,
        frequency_rank,
        jlpt_level,
        reference_ids,
        on_readings,
        kun_readings,
        meanings,
        name_readings,
    }))
}
