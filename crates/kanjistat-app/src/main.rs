use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kanjistat_config::Config;
use kanjistat_config::logging::LogConfig;
use kanjistat_core::TableCache;
use kanjistat_core::preprocess::{DefaultPreprocessor, Passthrough, Preprocessor};
use kanjistat_lang_japanese::{Attribute, KanjiTable, KanjidicLoader, TextReport, filter_in_scope};
use tracing_subscriber::EnvFilter;

pub mod input;
pub mod report;
pub mod settings;

use self::settings::{AxisPair, GlobalArgs};

/// Kanji grade, JLPT and frequency statistics for Japanese text
#[derive(Parser, Debug)]
#[command(name = "kanjistat", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report statistics for each text file (`-` reads stdin)
    Analyze {
        /// Attributes to report: grade, jlpt, freq
        #[arg(long = "attribute", short = 'a', value_delimiter = ',')]
        attributes: Vec<Attribute>,

        /// Correlate two attributes per character, e.g. `grade,freq`
        #[arg(long)]
        correlate: Option<AxisPair>,

        /// Apply NFKC normalization before filtering
        #[arg(long)]
        normalize: bool,

        /// Print one JSON object per text
        #[arg(long)]
        json: bool,

        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show dictionary entries for the given characters
    Lookup { characters: String },
    /// Parse the dictionary and rewrite the cache
    BuildCache,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = settings::resolve(&cli.global)?;
    init_tracing(&config.log);

    match cli.command {
        Command::Analyze {
            attributes,
            correlate,
            normalize,
            json,
            files,
        } => {
            let attributes = if attributes.is_empty() {
                settings::parse_attributes(&config.analysis.attributes)?
            } else {
                attributes
            };
            let table = load_table(&config, cli.global.rebuild_cache)?;
            let preprocessor: Box<dyn Preprocessor> = if normalize || config.analysis.normalize {
                Box::new(DefaultPreprocessor)
            } else {
                Box::new(Passthrough)
            };

            analyze(
                &table,
                &files,
                &attributes,
                correlate.map(|AxisPair(x, y)| (x, y)),
                preprocessor.as_ref(),
                json,
            )
        }
        Command::Lookup { characters } => {
            let table = load_table(&config, cli.global.rebuild_cache)?;
            for c in filter_in_scope(&characters).chars() {
                match table.get_char(c) {
                    Some(record) => print!("{}", report::render_record(record)),
                    None => println!("{c}  not a graded kanji"),
                }
            }
            Ok(())
        }
        Command::BuildCache => {
            let dictionary = &config.dictionary;
            let cache = TableCache::new(&dictionary.cache_path);
            let table = cache
                .rebuild(&KanjidicLoader, &dictionary.source_path)
                .with_context(|| format!("building cache from {}", dictionary.source_path.display()))?;
            println!("Cached {} characters in {}", table.len(), cache.path().display());
            Ok(())
        }
    }
}

fn init_tracing(log: &LogConfig) {
    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_table(config: &Config, rebuild: bool) -> anyhow::Result<KanjiTable> {
    let dictionary = &config.dictionary;
    let cache = dictionary
        .use_cache
        .then(|| TableCache::new(&dictionary.cache_path));

    KanjidicLoader
        .load(&dictionary.source_path, cache.as_ref(), rebuild)
        .with_context(|| format!("loading dictionary {}", dictionary.source_path.display()))
}

/// One report per readable file; unreadable files are skipped
fn analyze(
    table: &KanjiTable,
    files: &[PathBuf],
    attributes: &[Attribute],
    correlation: Option<(Attribute, Attribute)>,
    preprocessor: &dyn Preprocessor,
    json: bool,
) -> anyhow::Result<()> {
    let mut analyzed = 0usize;

    for path in files {
        let raw = match input::read_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping {}: {e:#}", path.display());
                continue;
            }
        };

        let text = preprocessor.process(&raw);
        let report = TextReport::analyze(
            input::display_name(path),
            &text,
            table,
            attributes,
            correlation,
        );

        if json {
            println!("{}", report::render_json(&report));
        } else {
            println!("{}", report::render_text(&report));
        }
        analyzed += 1;
    }

    if analyzed == 0 {
        anyhow::bail!("none of the {} input file(s) could be read", files.len());
    }
    Ok(())
}
