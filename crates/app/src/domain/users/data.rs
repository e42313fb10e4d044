//! User Data

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Login email; unique across users.
    pub email: String,

    /// Display username, also hashed into payment order ids.
    pub username: String,

    pub first_name: String,

    pub last_name: Option<String>,

    /// Administrators may inspect and cancel any transaction.
    pub is_admin: bool,
}
