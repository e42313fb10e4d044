//! Cart Handlers

pub(crate) mod active;
pub(crate) mod checkout;
pub(crate) mod index;
