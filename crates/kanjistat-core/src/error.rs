/// Failures while building or reloading a dictionary table.
///
/// All of these are fatal for the load call that produced them: no partial
/// table is ever handed back.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Malformed dictionary source: {0}")]
    MalformedSource(String),

    #[error("Entry {literal:?} is missing required field `{field}`")]
    FieldExtraction { literal: String, field: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub fn field(literal: impl Into<String>, field: impl Into<String>) -> Self {
        LoadError::FieldExtraction {
            literal: literal.into(),
            field: field.into(),
        }
    }
}
