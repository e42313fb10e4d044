//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use virtuele_app::domain::users::records::UserRecord;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Store the user the request authenticated as.
    fn insert_user(&mut self, user: UserRecord);

    fn user_or_401(&self) -> Result<&UserRecord, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user(&mut self, user: UserRecord) {
        self.inject(user);
    }

    fn user_or_401(&self) -> Result<&UserRecord, StatusError> {
        self.obtain::<UserRecord>()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}
