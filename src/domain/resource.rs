//! Resource value object.

use super::errors::ParseError;
use std::fmt;
use std::str::FromStr;

/// One of the independently cached resource classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Paginated recording listings
    Listings,
    /// Individual recordings
    Items,
    /// Dashboard aggregates
    Aggregates,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Listings => "listings",
            Self::Items => "items",
            Self::Aggregates => "aggregates",
        }
    }
}

impl FromStr for Resource {
    type Err = ParseError;

    /// Parse a resource name. `analytics` is accepted for aggregates.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listings" => Ok(Self::Listings),
            "items" => Ok(Self::Items),
            "aggregates" | "analytics" => Ok(Self::Aggregates),
            _ => Err(ParseError::UnknownResource(s.to_string())),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!("listings".parse::<Resource>(), Ok(Resource::Listings));
        assert_eq!("Items".parse::<Resource>(), Ok(Resource::Items));
        assert_eq!("aggregates".parse::<Resource>(), Ok(Resource::Aggregates));
    }

    #[test]
    fn test_analytics_alias() {
        assert_eq!("analytics".parse::<Resource>(), Ok(Resource::Aggregates));
    }

    #[test]
    fn test_parse_unknown() {
        assert!("uploads".parse::<Resource>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Resource::Items.to_string(), "items");
    }
}
