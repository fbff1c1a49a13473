use serde::{Deserialize, Serialize};

fn default_attributes() -> Vec<String> {
    vec!["grade".to_string(), "jlpt".to_string(), "freq".to_string()]
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Attributes reported for every text
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,
    /// Apply NFKC before filtering. Off by default: it rewrites full-width
    /// punctuation into ASCII forms outside the exclusion set
    #[serde(default)]
    pub normalize: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            attributes: default_attributes(),
            normalize: false,
        }
    }
}
