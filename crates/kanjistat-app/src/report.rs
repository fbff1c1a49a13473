use std::fmt::Write;

use kanjistat_lang_japanese::{CharacterRecord, FrequencyLevel, ReferenceCatalog, TextReport};
use serde_json::{Value, json};

/// Human-readable block for one text
pub fn render_text(report: &TextReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}:", report.name);
    let _ = writeln!(
        out,
        "  Characters: {} in scope, {} in dictionary ({} distinct)",
        report.in_scope, report.known, report.distinct_known
    );

    for (attribute, outcome) in &report.stats {
        let label = format!("{} Stats:", attribute.label());
        match outcome {
            Ok(s) => {
                let _ = writeln!(
                    out,
                    "  {label:<28} mean {:.3}  variance {:.3}  sd {:.3}  n {}",
                    s.mean, s.variance, s.std_dev, s.count
                );
            }
            Err(e) => {
                let _ = writeln!(out, "  {label:<28} {e}");
            }
        }
    }

    if report.known > 0 {
        let bands: Vec<String> = FrequencyLevel::ALL
            .iter()
            .filter_map(|level| {
                report
                    .frequency_bands
                    .get(level)
                    .map(|count| format!("{} {count}", level.as_str()))
            })
            .collect();
        let _ = writeln!(out, "  Frequency bands: {}", bands.join(", "));
    }

    if let Some(((x, y), outcome)) = &report.correlation {
        match outcome {
            Ok(r) => {
                let _ = writeln!(out, "  Correlation {x}/{y}: r = {r:.3}");
            }
            Err(e) => {
                let _ = writeln!(out, "  Correlation {x}/{y}: {e}");
            }
        }
    }

    out
}

/// One JSON object per text; failed statistics carry an `error` message
pub fn render_json(report: &TextReport) -> Value {
    let stats: serde_json::Map<String, Value> = report
        .stats
        .iter()
        .map(|(attribute, outcome)| {
            let value = match outcome {
                Ok(summary) => json!(summary),
                Err(e) => json!({ "error": e.to_string() }),
            };
            (attribute.as_str().to_string(), value)
        })
        .collect();

    let bands: serde_json::Map<String, Value> = report
        .frequency_bands
        .iter()
        .map(|(level, count)| (level.as_str().to_string(), json!(count)))
        .collect();

    let correlation = report.correlation.as_ref().map(|((x, y), outcome)| {
        let mut value = json!({ "x": x, "y": y });
        match outcome {
            Ok(r) => value["r"] = json!(r),
            Err(e) => value["error"] = json!(e.to_string()),
        }
        value
    });

    json!({
        "name": report.name,
        "in_scope": report.in_scope,
        "known": report.known,
        "distinct_known": report.distinct_known,
        "stats": stats,
        "frequency_bands": bands,
        "correlation": correlation,
    })
}

/// Dictionary entry as shown by `lookup`
pub fn render_record(record: &CharacterRecord) -> String {
    let mut out = String::new();

    let jlpt = record
        .jlpt()
        .map(|level| level.description().to_string())
        .unwrap_or_else(|| "-".to_string());
    let freq = match record.frequency_rank {
        Some(rank) => {
            let level = record.frequency_level();
            format!("#{rank} {} ({})", level.stars(), level.as_str())
        }
        None => "-".to_string(),
    };

    let _ = writeln!(
        out,
        "{}  grade {}  JLPT {}  frequency {}",
        record.literal, record.grade, jlpt, freq
    );

    for (label, values) in [
        ("on", &record.on_readings),
        ("kun", &record.kun_readings),
        ("nanori", &record.name_readings),
        ("meanings", &record.meanings),
    ] {
        if !values.is_empty() {
            let _ = writeln!(out, "  {label}: {}", values.join("; "));
        }
    }

    let references: Vec<String> = [ReferenceCatalog::NelsonClassic, ReferenceCatalog::OneillKanjiKey]
        .into_iter()
        .filter_map(|catalog| {
            record
                .reference_id(catalog)
                .map(|id| format!("{} {id}", catalog.as_str()))
        })
        .collect();
    if !references.is_empty() {
        let _ = writeln!(out, "  refs: {}", references.join(", "));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanjistat_lang_japanese::{Attribute, KanjiTable};

    fn record(literal: &str, grade: u8, jlpt: Option<u8>, freq: Option<u32>) -> CharacterRecord {
        CharacterRecord {
            literal: literal.to_string(),
            grade,
            frequency_rank: freq,
            jlpt_level: jlpt,
            reference_ids: Default::default(),
            on_readings: vec![],
            kun_readings: vec![],
            meanings: vec![],
            name_readings: vec![],
        }
    }

    fn table() -> KanjiTable {
        KanjiTable::from_records([
            record("火", 1, Some(4), Some(574)),
            record("星", 2, Some(2), Some(844)),
            record("鬱", 8, None, None),
        ])
    }

    #[test]
    fn test_text_report_shows_stats_and_failures() {
        let report = TextReport::analyze(
            "火星.txt",
            "火星と鬱",
            &table(),
            &[Attribute::Grade, Attribute::Jlpt],
            Some((Attribute::Grade, Attribute::Frequency)),
        );
        let text = render_text(&report);

        assert!(text.starts_with("火星.txt:\n"));
        assert!(text.contains("3 in scope, 3 in dictionary (3 distinct)"));
        assert!(text.contains("Grade Level Stats:"));
        assert!(text.contains("mean 3.667"));
        assert!(text.contains("n 3"));
        assert!(text.contains("Common 2"));
        assert!(text.contains("Unknown 1"));
        assert!(text.contains("Correlation grade/freq: r = 1.000"));
    }

    #[test]
    fn test_text_report_insufficient_data() {
        let report = TextReport::analyze("ascii", "no kanji", &table(), &[Attribute::Grade], None);
        let text = render_text(&report);
        assert!(text.contains("Insufficient data"));
        assert!(!text.contains("Frequency bands"));
    }

    #[test]
    fn test_json_report() {
        let report = TextReport::analyze(
            "sample",
            "火星鬱",
            &table(),
            &[Attribute::Grade, Attribute::Jlpt],
            Some((Attribute::Grade, Attribute::Jlpt)),
        );
        let value = render_json(&report);

        assert_eq!(value["name"], "sample");
        assert_eq!(value["known"], 3);
        assert_eq!(value["stats"]["grade"]["count"], 3);
        assert_eq!(value["stats"]["jlpt"]["count"], 2);
        assert_eq!(value["correlation"]["x"], "grade");
        assert!(value["correlation"]["r"].is_number());
        assert_eq!(value["frequency_bands"]["Unknown"], 1);
    }

    #[test]
    fn test_json_report_error_entries() {
        let report = TextReport::analyze("empty", "", &table(), &[Attribute::Frequency], None);
        let value = render_json(&report);
        assert!(value["stats"]["freq"]["error"].is_string());
        assert!(value["correlation"].is_null());
    }

    #[test]
    fn test_record_rendering() {
        let mut fire = record("火", 1, Some(4), Some(574));
        fire.on_readings = vec!["カ".to_string()];
        fire.kun_readings = vec!["ひ".to_string(), "-び".to_string()];
        fire.meanings = vec!["fire".to_string()];
        fire.reference_ids
            .insert(ReferenceCatalog::NelsonClassic, "2767".to_string());

        let text = render_record(&fire);
        assert!(text.starts_with("火  grade 1  JLPT N4 (Elementary)  frequency #574"));
        assert!(text.contains("(Common)"));
        assert!(text.contains("  kun: ひ; -び\n"));
        assert!(text.contains("  meanings: fire\n"));
        assert!(text.contains("  refs: Nelson 2767\n"));
        assert!(!text.contains("nanori"));
    }

    #[test]
    fn test_record_rendering_without_optional_fields() {
        let text = render_record(&record("鬱", 8, None, None));
        assert_eq!(text, "鬱  grade 8  JLPT -  frequency -\n");
    }
}
