/// JLPT level of a character as numbered in KANJIDIC2.
///
/// KANJIDIC2 still records the pre-2010 four-level test; `N5` is accepted
/// for sources that use the current scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum JlptLevel {
    N1, // Advanced
    N2, // Upper intermediate
    N3, // Intermediate
    N4, // Elementary
    N5, // Beginner
}

impl JlptLevel {
    /// Parse the numeric level (1 = hardest)
    pub fn from_number(level: u8) -> Option<Self> {
        match level {
            1 => Some(JlptLevel::N1),
            2 => Some(JlptLevel::N2),
            3 => Some(JlptLevel::N3),
            4 => Some(JlptLevel::N4),
            5 => Some(JlptLevel::N5),
            _ => None,
        }
    }

    /// Get level description
    pub fn description(&self) -> &'static str {
        match self {
            JlptLevel::N1 => "N1 (Advanced)",
            JlptLevel::N2 => "N2 (Upper Intermediate)",
            JlptLevel::N3 => "N3 (Intermediate)",
            JlptLevel::N4 => "N4 (Elementary)",
            JlptLevel::N5 => "N5 (Beginner)",
        }
    }
}
