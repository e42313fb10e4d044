//! Line Sizes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Garment size of a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    S,
    M,
    L,
}

impl Size {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::S => "S",
            Self::M => "M",
            Self::L => "L",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("size must be one of S, M or L, got {0:?}")]
pub struct InvalidSize(pub String);

impl FromStr for Size {
    type Err = InvalidSize;

    /// Accepts `s`, `m`, `l` in either case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_uppercase().as_str() {
            "S" => Ok(Self::S),
            "M" => Ok(Self::M),
            "L" => Ok(Self::L),
            _ => Err(InvalidSize(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sizes_case_insensitively() {
        assert_eq!("s".parse::<Size>(), Ok(Size::S));
        assert_eq!("M".parse::<Size>(), Ok(Size::M));
        assert_eq!("l".parse::<Size>(), Ok(Size::L));
    }

    #[test]
    fn rejects_unknown_sizes() {
        assert_eq!("XL".parse::<Size>(), Err(InvalidSize("XL".to_string())));
        assert!("".parse::<Size>().is_err());
        assert!("small".parse::<Size>().is_err());
    }

    #[test]
    fn displays_as_uppercase_letter() {
        assert_eq!(Size::M.to_string(), "M");
        assert_eq!(Size::L.as_str(), "L");
    }
}
