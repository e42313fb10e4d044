//! Test infrastructure

mod context;
mod db;
pub(crate) mod helpers;

pub(crate) use context::{TEST_SERVER_KEY, TestContext};
