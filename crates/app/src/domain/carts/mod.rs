//! Carts

pub(crate) mod checkout;
pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
pub mod size;

pub use errors::CartsServiceError;
pub use service::*;
pub use size::{InvalidSize, Size};
