pub mod analysis;
pub mod filter;
pub mod frequency;
pub mod jlpt;
pub mod kanjidic;
pub mod loader;
pub mod table;
pub mod xml;

pub use analysis::{Attribute, TextReport, aggregate, correlate};
pub use filter::filter_in_scope;
pub use frequency::FrequencyLevel;
pub use jlpt::JlptLevel;
pub use kanjidic::{CharacterRecord, ReferenceCatalog};
pub use loader::KanjidicLoader;
pub use table::KanjiTable;
