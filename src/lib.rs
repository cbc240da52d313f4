//! An item catalog served over HTTP.

pub mod feature;
pub mod infra;
pub mod server;
