use unicode_normalization::UnicodeNormalization;

/// Text cleanup applied before a text is analyzed
pub trait Preprocessor {
    // Default JP preprocessor
    fn process(&self, text: &str) -> String {
        // Unicode normalization (NFKC) folds half-width katakana and
        // compatibility ideographs into their canonical forms
        text.nfkc().collect()
    }
}

/// NFKC normalization
pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// Leaves the text untouched
pub struct Passthrough;
impl Preprocessor for Passthrough {
    fn process(&self, text: &str) -> String {
        text.to_string()
    }
}
