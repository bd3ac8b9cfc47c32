//! Route definitions for the loanbook API

mod dashboard;
mod loan;

pub use dashboard::dashboard_routes;
pub use loan::loan_routes;
