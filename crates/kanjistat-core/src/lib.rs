pub mod cache;
pub mod dictionary;
pub mod error;
pub mod preprocess;
pub mod stats;

pub use cache::TableCache;
pub use dictionary::DictionaryLoader;
pub use error::LoadError;
pub use stats::{StatSummary, StatsError};
