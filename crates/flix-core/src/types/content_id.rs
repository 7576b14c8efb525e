//! Content identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Identity of a catalog record.
///
/// Unique within the effective catalog. Base records carry the ids shipped
/// with the fixture; records added through the content store get a freshly
/// generated one.
///
/// # Example
///
/// ```
/// use flix_core::ContentId;
///
/// let id: ContentId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(i64);

impl ContentId {
    /// Wrap a raw integer id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw integer.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self).map_err(|e| {
            InvalidInputError::Other {
                message: format!("invalid content id '{}': {}", s, e),
            }
            .into()
        })
    }
}

impl From<i64> for ContentId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ContentId> for i64 {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integer() {
        assert_eq!("17".parse::<ContentId>().unwrap(), ContentId::new(17));
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("abc".parse::<ContentId>().is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&ContentId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
