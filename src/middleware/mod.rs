//! Middleware for the loanbook API

mod tracing;

pub use tracing::request_tracing;
