//! ItemInclude value object.

use super::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much of an item the backend should return.
///
/// # Example
///
/// ```
/// use call_analysis_cache::domain::ItemInclude;
///
/// let include: ItemInclude = "transcription".parse().unwrap();
/// assert_eq!(include.as_str(), "transcription");
/// assert!(include.is_full());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemInclude {
    /// Lightweight metadata only
    #[default]
    Summary,
    /// Analysis result
    Result,
    /// Full transcription
    Transcription,
    /// Everything
    All,
}

impl ItemInclude {
    /// Every include level, in the order targeted invalidation removes them.
    pub const ALL_VARIANTS: [ItemInclude; 4] = [
        ItemInclude::Summary,
        ItemInclude::Result,
        ItemInclude::Transcription,
        ItemInclude::All,
    ];

    /// Wire name, as used in the `include` query parameter and in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Result => "result",
            Self::Transcription => "transcription",
            Self::All => "all",
        }
    }

    /// Whether this include carries more than the summary.
    pub fn is_full(&self) -> bool {
        !matches!(self, Self::Summary)
    }
}

impl FromStr for ItemInclude {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "result" => Ok(Self::Result),
            "transcription" => Ok(Self::Transcription),
            "all" => Ok(Self::All),
            _ => Err(ParseError::UnknownInclude(s.to_string())),
        }
    }
}

impl fmt::Display for ItemInclude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
