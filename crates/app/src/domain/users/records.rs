//! User Records

use jiff::Timestamp;

use crate::ids::TypedId;

/// User ID
pub type UserId = TypedId<UserRecord>;

/// User Record
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub is_active: bool,
    pub is_admin: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    /// Whether this user may act on a resource owned by `owner`.
    #[must_use]
    pub fn can_access(&self, owner: UserId) -> bool {
        self.is_admin || self.id == owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, is_admin: bool) -> UserRecord {
        UserRecord {
            id: UserId::from_i64(id),
            email: format!("user{id}@example.com"),
            username: format!("user{id}"),
            first_name: "Test".to_string(),
            last_name: None,
            is_active: true,
            is_admin,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn owner_can_access_own_resources() {
        assert!(user(1, false).can_access(UserId::from_i64(1)));
    }

    #[test]
    fn other_users_cannot_access() {
        assert!(!user(2, false).can_access(UserId::from_i64(1)));
    }

    #[test]
    fn admins_can_access_anything() {
        assert!(user(2, true).can_access(UserId::from_i64(1)));
    }
}
