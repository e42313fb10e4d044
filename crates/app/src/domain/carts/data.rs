//! Cart Data

/// Which carts to return when listing a user's carts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CartFilter {
    #[default]
    All,
    Active,
    CheckedOut,
}

impl CartFilter {
    /// `checked_out` value to match, `None` for every cart.
    #[must_use]
    pub const fn checked_out(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(false),
            Self::CheckedOut => Some(true),
        }
    }
}

impl From<Option<bool>> for CartFilter {
    fn from(checked: Option<bool>) -> Self {
        match checked {
            None => Self::All,
            Some(false) => Self::Active,
            Some(true) => Self::CheckedOut,
        }
    }
}
