//! Fixed-payment amortization math
//!
//! Pure functions deriving display figures for a loan. Stored decimal fields
//! are converted to `f64` only here, at the presentation boundary; rounding is
//! left to the consumer.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::loan::model::Loan;

/// Fixed monthly payment for a loan.
///
/// `annual_rate_percent` is a percentage (6.0 means 6% per year). A zero rate
/// degrades to straight-line repayment since the annuity formula would divide
/// by zero.
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    if monthly_rate == 0.0 {
        return principal / term_months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(term_months as i32);
    principal * monthly_rate * growth / (growth - 1.0)
}

/// Total amount repaid over the full term.
pub fn total_repayment(principal: f64, annual_rate_percent: f64, term_months: u32) -> f64 {
    monthly_payment(principal, annual_rate_percent, term_months) * term_months as f64
}

/// Computed repayment figures for a loan, for display
#[derive(Debug, Serialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub total_interest: f64,
}

impl LoanSummary {
    pub fn for_loan(loan: &Loan) -> Self {
        let principal = loan.amount.to_f64().unwrap_or(0.0);
        let rate = loan.interest_rate.to_f64().unwrap_or(0.0);
        let term = loan.term.max(1) as u32;

        let monthly = monthly_payment(principal, rate, term);
        let total = monthly * term as f64;

        Self {
            monthly_payment: monthly,
            total_repayment: total,
            total_interest: total - principal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {} within {} of {}",
            actual,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        assert_eq!(monthly_payment(12000.0, 0.0, 12), 1000.0);
        assert_eq!(monthly_payment(900.0, 0.0, 3), 300.0);
    }

    #[test]
    fn test_zero_rate_total_equals_principal() {
        assert_eq!(total_repayment(12000.0, 0.0, 12), 12000.0);
        assert_eq!(total_repayment(500.0, 0.0, 7), 500.0);
    }

    #[test]
    fn test_known_payment_values() {
        // $10,000 at 6% for 12 months
        assert_close(monthly_payment(10000.0, 6.0, 12), 860.66, 0.01);

        // $100,000 at 5% for 30 years
        assert_close(monthly_payment(100000.0, 5.0, 360), 536.82, 0.01);
    }

    #[test]
    fn test_known_total_repayment() {
        assert_close(total_repayment(10000.0, 6.0, 12), 10327.97, 0.1);
    }

    #[test]
    fn test_positive_rate_accrues_interest() {
        for &(principal, rate, term) in &[
            (1000.0, 0.01, 6u32),
            (10000.0, 6.0, 12),
            (250000.0, 7.25, 360),
            (5000.0, 100.0, 24),
        ] {
            assert!(
                total_repayment(principal, rate, term) > principal,
                "total must exceed principal for rate {}",
                rate
            );
        }
    }

    #[test]
    fn test_single_month_term() {
        // One payment covers principal plus one month of interest
        let payment = monthly_payment(1200.0, 12.0, 1);
        assert_close(payment, 1212.0, 0.01);
    }

    #[test]
    fn test_summary_for_loan() {
        use crate::loan::model::{LoanPurpose, LoanStatus};
        use rust_decimal_macros::dec;
        use sqlx::types::chrono::{NaiveDate, Utc};
        use uuid::Uuid;

        let loan = Loan {
            id: Uuid::new_v4(),
            loan_number: "LN-000001".to_string(),
            purpose: LoanPurpose::Personal,
            borrower_name: "Bob Smith".to_string(),
            borrower_email: "bob@example.com".to_string(),
            amount: dec!(10000),
            interest_rate: dec!(6.00),
            term: 12,
            status: LoanStatus::Active,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let summary = LoanSummary::for_loan(&loan);
        assert_close(summary.monthly_payment, 860.66, 0.01);
        assert_close(summary.total_repayment, 10327.97, 0.1);
        assert_close(summary.total_interest, 327.97, 0.1);
    }
}
