use serde::Serialize;

/// Coarse band of a KANJIDIC2 frequency rank.
///
/// Ranks only exist for the 2500 most used characters; anything without a
/// rank is `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FrequencyLevel {
    VeryCommon,
    Common,
    Uncommon,
    Rare,
    Unknown,
}

impl FrequencyLevel {
    pub const ALL: [FrequencyLevel; 5] = [
        FrequencyLevel::VeryCommon,
        FrequencyLevel::Common,
        FrequencyLevel::Uncommon,
        FrequencyLevel::Rare,
        FrequencyLevel::Unknown,
    ];

    pub fn from_rank(rank: Option<u32>) -> Self {
        match rank {
            Some(rank) if rank <= 500 => FrequencyLevel::VeryCommon,
            Some(rank) if rank <= 1000 => FrequencyLevel::Common,
            Some(rank) if rank <= 2000 => FrequencyLevel::Uncommon,
            Some(_) => FrequencyLevel::Rare,
            None => FrequencyLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FrequencyLevel::VeryCommon => "Very Common",
            FrequencyLevel::Common => "Common",
            FrequencyLevel::Uncommon => "Uncommon",
            FrequencyLevel::Rare => "Rare",
            FrequencyLevel::Unknown => "Unknown",
        }
    }

    /// Star rating, empty when unranked
    pub fn stars(&self) -> &'static str {
        match self {
            FrequencyLevel::VeryCommon => "★★★★",
            FrequencyLevel::Common => "★★★",
            FrequencyLevel::Uncommon => "★★",
            FrequencyLevel::Rare => "★",
            FrequencyLevel::Unknown => "",
        }
    }
}
