//! HTTP handlers for the loanbook API

mod dashboard;
mod loan;

pub use dashboard::get_dashboard_stats;
pub use loan::{create_loan, delete_loan, get_loan, get_loan_summary, list_loans, update_loan};
