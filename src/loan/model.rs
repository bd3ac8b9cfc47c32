//! Loan models and request/response DTOs

use std::borrow::Cow;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Loan status enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanStatus {
    Pending,
    Active,
    Paid,
    Defaulted,
}

/// Loan purpose enum
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "loan_purpose", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanPurpose {
    Personal,
    Mortgage,
    Auto,
    Business,
    Other,
}

/// Loan record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Loan {
    pub id: Uuid,
    pub loan_number: String,
    pub purpose: LoanPurpose,
    pub borrower_name: String,
    pub borrower_email: String,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub term: i32,
    pub status: LoanStatus,
    pub start_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Columns the loan list can be sorted by
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    LoanNumber,
    BorrowerName,
    Amount,
    InterestRate,
    Term,
    StartDate,
    CreatedAt,
}

impl SortColumn {
    /// SQL expression to sort by. String columns compare case-insensitively.
    pub fn sql_expr(&self) -> &'static str {
        match self {
            SortColumn::LoanNumber => "LOWER(loan_number)",
            SortColumn::BorrowerName => "LOWER(borrower_name)",
            SortColumn::Amount => "amount",
            SortColumn::InterestRate => "interest_rate",
            SortColumn::Term => "term",
            SortColumn::StartDate => "start_date",
            SortColumn::CreatedAt => "created_at",
        }
    }
}

/// Sort direction
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Query parameters for listing loans
///
/// `status` and `purpose` are typed enums, so an unrecognized filter value is
/// rejected at the boundary instead of silently matching nothing.
#[derive(Debug, Default, Deserialize)]
pub struct ListLoansQuery {
    pub search: Option<String>,
    pub status: Option<LoanStatus>,
    pub purpose: Option<LoanPurpose>,
    pub sort_by: Option<SortColumn>,
    pub sort_order: Option<SortOrder>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// A page of loans plus aggregate counts
#[derive(Debug, Serialize)]
pub struct PaginatedLoans {
    pub loans: Vec<Loan>,
    pub total: i64,
    pub has_more: bool,
}

impl PaginatedLoans {
    /// Build a page; `has_more` is true when records remain past this page.
    pub fn new(loans: Vec<Loan>, total: i64, offset: i64) -> Self {
        let has_more = offset + (loans.len() as i64) < total;
        Self {
            loans,
            total,
            has_more,
        }
    }
}

/// Dashboard aggregates across all loans
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_loans: i64,
    pub total_portfolio_value: Decimal,
    pub pending_count: i64,
    pub active_count: i64,
    pub paid_count: i64,
    pub defaulted_count: i64,
    pub recent_loans: Vec<Loan>,
}

/// Request DTO for creating or updating a loan
#[derive(Debug, Deserialize, Validate)]
pub struct LoanInput {
    pub purpose: LoanPurpose,

    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub borrower_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub borrower_email: String,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    #[validate(custom = "validate_interest_rate")]
    pub interest_rate: Decimal,

    #[validate(range(min = 1, max = 360, message = "Term must be between 1 and 360 months"))]
    pub term: i32,

    pub status: LoanStatus,

    pub start_date: NaiveDate,
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    // (0, 10_000_000]
    if *amount <= Decimal::ZERO {
        return Err(validation_error("amount_min", "Amount must be greater than 0"));
    }
    if *amount > Decimal::from(10_000_000) {
        return Err(validation_error(
            "amount_max",
            "Amount cannot exceed 10,000,000",
        ));
    }
    Ok(())
}

fn validate_interest_rate(rate: &Decimal) -> Result<(), ValidationError> {
    // [0.01, 100]
    if *rate < Decimal::new(1, 2) {
        return Err(validation_error(
            "interest_rate_min",
            "Interest rate must be at least 0.01%",
        ));
    }
    if *rate > Decimal::from(100) {
        return Err(validation_error(
            "interest_rate_max",
            "Interest rate cannot exceed 100%",
        ));
    }
    Ok(())
}

/// Derive the human-facing loan number from the current record count
pub fn generate_loan_number(count: i64) -> String {
    format!("LN-{:06}", count + 1)
}

/// Escape LIKE metacharacters so user search input matches literally
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
