//! Payment Handlers

pub(crate) mod cancel;
pub(crate) mod charge;
pub(crate) mod notification;
pub(crate) mod status;
