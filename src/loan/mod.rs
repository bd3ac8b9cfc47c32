//! Loan domain: records, amortization math, and the query/mutation service

pub mod amortization;
pub mod model;
pub mod service;

pub use amortization::{monthly_payment, total_repayment, LoanSummary};
pub use model::{
    generate_loan_number, DashboardStats, ListLoansQuery, Loan, LoanInput, LoanPurpose,
    LoanStatus, PaginatedLoans, SortColumn, SortOrder,
};
pub use service::LoanService;
