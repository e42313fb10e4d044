//! Virtuele Domain Concerns

pub mod carts;
pub mod payments;
pub mod products;
pub mod transactions;
pub mod users;
