use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Args;
use kanjistat_config::Config;
use kanjistat_lang_japanese::Attribute;

/// Options shared by every subcommand
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// JSON profile to read settings from
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// KANJIDIC2 XML file
    #[arg(long, global = true)]
    pub dictionary: Option<PathBuf>,

    /// Location of the parsed dictionary cache
    #[arg(long, global = true)]
    pub cache: Option<PathBuf>,

    /// Parse the dictionary without reading or writing the cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Parse the dictionary even if a cache exists, then rewrite the cache
    #[arg(long, global = true)]
    pub rebuild_cache: bool,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

/// Two attributes to correlate, written `grade,freq`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPair(pub Attribute, pub Attribute);

impl FromStr for AxisPair {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected two attributes such as `grade,freq`, got `{s}`"))?;
        Ok(AxisPair(x.parse()?, y.parse()?))
    }
}

/// Profile or environment settings with command-line flags applied on top
pub fn resolve(args: &GlobalArgs) -> anyhow::Result<Config> {
    let mut config = Config::resolve(args.config.as_deref())?;

    if let Some(path) = &args.dictionary {
        config.dictionary.source_path = path.clone();
    }
    if let Some(path) = &args.cache {
        config.dictionary.cache_path = path.clone();
    }
    if args.no_cache {
        config.dictionary.use_cache = false;
    }
    if args.log_json {
        config.log.json = true;
    }

    Ok(config)
}

/// Parse attribute names from a profile
pub fn parse_attributes(names: &[String]) -> anyhow::Result<Vec<Attribute>> {
    names
        .iter()
        .map(|name| {
            name.parse::<Attribute>()
                .map_err(anyhow::Error::msg)
                .context("invalid `analysis.attributes` entry")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_profile() {
        let dir = tempfile::tempdir().unwrap();
        let profile = dir.path().join("profile.json");
        std::fs::write(
            &profile,
            r#"{ "dictionary": { "source_path": "from-profile.xml", "cache_path": "profile.cache.json" } }"#,
        )
        .unwrap();

        let args = GlobalArgs {
            config: Some(profile),
            cache: Some(PathBuf::from("flag.cache.json")),
            no_cache: true,
            log_json: true,
            ..Default::default()
        };
        let config = resolve(&args).unwrap();

        assert_eq!(config.dictionary.source_path, PathBuf::from("from-profile.xml"));
        assert_eq!(config.dictionary.cache_path, PathBuf::from("flag.cache.json"));
        assert!(!config.dictionary.use_cache);
        assert!(config.log.json);
    }

    #[test]
    fn test_axis_pair_parsing() {
        assert_eq!(
            "grade,freq".parse::<AxisPair>(),
            Ok(AxisPair(Attribute::Grade, Attribute::Frequency))
        );
        assert!("grade".parse::<AxisPair>().is_err());
        assert!("grade,strokes".parse::<AxisPair>().is_err());
    }

    #[test]
    fn test_parse_attributes() {
        let names = vec!["grade".to_string(), "freq".to_string()];
        assert_eq!(
            parse_attributes(&names).unwrap(),
            vec![Attribute::Grade, Attribute::Frequency]
        );
        assert!(parse_attributes(&["radical".to_string()]).is_err());
    }
}
