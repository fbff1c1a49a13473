use std::path::{Path, PathBuf};

use kanjistat_core::stats::StatsError;
use kanjistat_core::{DictionaryLoader, LoadError, TableCache};
use kanjistat_lang_japanese::{
    Attribute, KanjiTable, KanjidicLoader, ReferenceCatalog, aggregate, correlate, filter_in_scope,
};

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/kanjidic2_sample.xml")
}

fn load_fixture() -> KanjiTable {
    KanjidicLoader
        .load_from_file(&fixture_path())
        .expect("fixture parses")
}

#[test]
fn test_fixture_loads_graded_characters_in_order() {
    let table = load_fixture();

    // 丑 has no grade
    assert_eq!(
        table.literals().collect::<Vec<_>>(),
        vec!["亜", "一", "火", "星", "時", "猫", "鬱"]
    );
    assert!(table.get("丑").is_none());
}

#[test]
fn test_every_record_has_a_grade_field() {
    let table = load_fixture();
    let source = std::fs::read_to_string(fixture_path()).unwrap();

    for record in table.iter() {
        assert!((1..=10).contains(&record.grade), "{}", record.literal);
    }
    // The only ungraded entry in the source never reaches the table
    assert!(source.contains("<literal>丑</literal>"));
    assert!(!table.contains("丑"));
}

#[test]
fn test_record_fields_match_source() {
    let table = load_fixture();
    let record = table.get("亜").unwrap();

    assert_eq!(record.grade, 8);
    assert_eq!(record.frequency_rank, Some(1509));
    assert_eq!(record.jlpt_level, Some(1));
    assert_eq!(record.reference_id(ReferenceCatalog::NelsonClassic), Some("43"));
    assert_eq!(record.reference_id(ReferenceCatalog::OneillKanjiKey), Some("1788"));
    assert_eq!(record.on_readings, vec!["ア"]);
    assert_eq!(record.kun_readings, vec!["つ.ぐ"]);
    assert_eq!(record.meanings, vec!["Asia", "rank next"]);
    assert_eq!(record.name_readings, vec!["や", "つぎ", "つぐ"]);

    let cat = table.get("猫").unwrap();
    assert_eq!(cat.jlpt_level, None);
    assert!(cat.reference_ids.is_empty());
}

#[test]
fn test_cache_round_trip_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let cache = TableCache::new(dir.path().join("kanjidic.cache.json"));

    let parsed = KanjidicLoader.load(&fixture_path(), Some(&cache), false).unwrap();
    assert!(cache.exists());

    let reloaded: KanjiTable = cache.load().unwrap();
    assert_eq!(reloaded, parsed);
    assert_eq!(
        reloaded.literals().collect::<Vec<_>>(),
        parsed.literals().collect::<Vec<_>>()
    );
    for record in parsed.iter() {
        assert_eq!(reloaded.get(&record.literal), Some(record));
    }
}

#[test]
fn test_existing_cache_skips_the_source() {
    let dir = tempfile::tempdir().unwrap();
    let cache = TableCache::new(dir.path().join("kanjidic.cache.json"));
    let parsed = KanjidicLoader.load(&fixture_path(), Some(&cache), false).unwrap();

    let missing_source = dir.path().join("gone.xml");
    let reloaded = KanjidicLoader.load(&missing_source, Some(&cache), false).unwrap();
    assert_eq!(reloaded, parsed);

    // A rebuild has to read the source again
    let err = KanjidicLoader.load(&missing_source, Some(&cache), true).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_malformed_source_is_fatal() {
    let err = KanjidicLoader
        .load_from_str("<kanjidic2><character><literal>火</literal></kanjidic2>")
        .unwrap_err();
    assert!(matches!(err, LoadError::MalformedSource(_)));

    let err = KanjidicLoader.load_from_str("").unwrap_err();
    assert!(matches!(err, LoadError::MalformedSource(_)));
}

#[test]
fn test_missing_substructure_is_fatal() {
    let source = r#"<kanjidic2>
        <character><literal>一</literal><misc><grade>1</grade></misc>
            <reading_meaning><rmgroup><meaning>one</meaning></rmgroup></reading_meaning>
        </character>
        <character><literal>二</literal><misc><grade>1</grade></misc></character>
    </kanjidic2>"#;

    match KanjidicLoader.load_from_str(source) {
        Err(LoadError::FieldExtraction { literal, field }) => {
            assert_eq!(literal, "二");
            assert_eq!(field, "reading_meaning");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_grade_statistics_over_text() {
    let table = load_fixture();
    let text = "火曜日の星空（Mars）";

    // 火 and 星 are the only known characters
    let summary = aggregate(text, &table, Attribute::Grade).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean, 1.5);
    assert_eq!(summary.variance, 0.5);
}

#[test]
fn test_grade_one_repeated() {
    let table = load_fixture();
    let summary = aggregate("一つ、一人、一日", &table, Attribute::Grade).unwrap();
    assert_eq!(summary.count, 3);
    assert_eq!(summary.variance, 0.0);
}

#[test]
fn test_frequency_skips_unranked_characters() {
    let table = load_fixture();
    // 鬱 has no frequency rank
    let summary = aggregate("時鬱火", &table, Attribute::Frequency).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean, (16.0 + 574.0) / 2.0);
}

#[test]
fn test_ascii_text_is_insufficient() {
    let table = load_fixture();
    for attribute in Attribute::ALL {
        assert_eq!(
            aggregate("Plain ASCII text 42", &table, attribute),
            Err(StatsError::EmptySample { found: 0 })
        );
    }
}

#[test]
fn test_filter_then_aggregate_matches_raw_text() {
    let table = load_fixture();
    let text = "吾輩は猫である。名前はまだ無い。時々、星を見る。";
    assert_eq!(
        aggregate(text, &table, Attribute::Grade),
        aggregate(&filter_in_scope(text), &table, Attribute::Grade)
    );
}

#[test]
fn test_correlation_over_fixture() {
    let table = load_fixture();
    let r = correlate("一火星亜", &table, Attribute::Grade, Attribute::Jlpt).unwrap();
    // Higher grades go with harder (numerically lower) JLPT levels
    assert!(r < 0.0, "r = {r}");
}

#[test]
fn test_invalid_utf8_source_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.xml");
    std::fs::write(&path, b"<kanjidic2>\xff\xfe</kanjidic2>").unwrap();

    let err = KanjidicLoader.load_from_file(&path).unwrap_err();
    assert!(matches!(err, LoadError::MalformedSource(_)), "{err:?}");

    // Unreadable files stay I/O errors
    let err = KanjidicLoader
        .load_from_file(&dir.path().join("absent.xml"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
    assert_eq!(KanjidicLoader.supported_formats(), vec!["kanjidic2"]);
}
