//! Payments

pub(crate) mod errors;
pub(crate) mod gateway;
mod handlers;
pub(crate) mod responses;

pub(crate) use handlers::*;
