//! Payments

pub mod errors;
pub mod gateway;
pub mod method;
pub mod notification;
pub mod request;
pub mod service;

pub use errors::PaymentsServiceError;
pub use method::{InvalidPaymentMethod, PaymentMethod, Store};
pub use service::*;
