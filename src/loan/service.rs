//! Loan service layer - queries, aggregates, and mutations over the loans table

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::loan::model::{
    escape_like, generate_loan_number, DashboardStats, ListLoansQuery, Loan, LoanInput,
    LoanStatus, PaginatedLoans, SortColumn, SortOrder,
};

/// Page size used when the caller does not supply a limit
const DEFAULT_PAGE_SIZE: i64 = 20;

/// Number of loans shown in the dashboard's recent list
const RECENT_LOANS_COUNT: i64 = 5;

/// Loan service for listing, aggregating, and mutating loan records
#[derive(Clone)]
pub struct LoanService {
    db_pool: PgPool,
}

impl LoanService {
    /// Create a new loan service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// List loans matching the given filters, sorted and paginated.
    ///
    /// All present filters AND together. `total` counts every matching record,
    /// not just the returned page. A trailing `id` tie-break keeps page
    /// boundaries deterministic when the sort column has duplicates.
    pub async fn list_loans(&self, query: ListLoansQuery) -> Result<PaginatedLoans, ApiError> {
        let offset = query.offset.unwrap_or(0);
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);

        if offset < 0 {
            return Err(ApiError::BadRequest(
                "Offset must not be negative".to_string(),
            ));
        }
        if limit <= 0 {
            return Err(ApiError::BadRequest("Limit must be positive".to_string()));
        }

        let sort_by = query.sort_by.unwrap_or(SortColumn::CreatedAt);
        let sort_order = query.sort_order.unwrap_or(SortOrder::Desc);

        let mut query_builder = sqlx::QueryBuilder::new("SELECT * FROM loans WHERE 1=1");
        let mut count_builder = sqlx::QueryBuilder::new("SELECT COUNT(*) FROM loans WHERE 1=1");

        // Empty search means "match all", not match-against-empty-string
        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("%{}%", escape_like(search));
            for builder in [&mut query_builder, &mut count_builder] {
                builder.push(" AND (borrower_name ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(" OR loan_number ILIKE ");
                builder.push_bind(pattern.clone());
                builder.push(")");
            }
        }

        if let Some(status) = query.status {
            for builder in [&mut query_builder, &mut count_builder] {
                builder.push(" AND status = ");
                builder.push_bind(status);
            }
        }

        if let Some(purpose) = query.purpose {
            for builder in [&mut query_builder, &mut count_builder] {
                builder.push(" AND purpose = ");
                builder.push_bind(purpose);
            }
        }

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.db_pool)
            .await?;

        query_builder.push(format!(
            " ORDER BY {} {}, id ASC LIMIT ",
            sort_by.sql_expr(),
            sort_order.as_sql()
        ));
        query_builder.push_bind(limit);
        query_builder.push(" OFFSET ");
        query_builder.push_bind(offset);

        let loans = query_builder
            .build_query_as::<Loan>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(PaginatedLoans::new(loans, total, offset))
    }

    /// Get loan by ID
    pub async fn get_loan(&self, id: Uuid) -> Result<Loan, ApiError> {
        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or(ApiError::NotFound("Loan not found".to_string()))?;

        Ok(loan)
    }

    /// Create a new loan from validated input, assigning its loan number
    pub async fn create_loan(&self, input: LoanInput) -> Result<Loan, ApiError> {
        input.validate()?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans")
            .fetch_one(&self.db_pool)
            .await?;
        let loan_number = generate_loan_number(count);

        let now = Utc::now();
        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (
                loan_number, purpose, borrower_name, borrower_email,
                amount, interest_rate, term, status, start_date,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&loan_number)
        .bind(input.purpose)
        .bind(&input.borrower_name)
        .bind(&input.borrower_email)
        .bind(input.amount)
        .bind(input.interest_rate)
        .bind(input.term)
        .bind(input.status)
        .bind(input.start_date)
        .bind(now)
        .bind(now)
        .fetch_one(&self.db_pool)
        .await?;

        tracing::info!(loan_number = %loan.loan_number, "Loan created");

        Ok(loan)
    }

    /// Update an existing loan. `id`, `loan_number`, and `created_at` are
    /// immutable; everything else is replaced by the validated input.
    pub async fn update_loan(&self, id: Uuid, input: LoanInput) -> Result<Loan, ApiError> {
        input.validate()?;

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE loans
            SET purpose = $1, borrower_name = $2, borrower_email = $3,
                amount = $4, interest_rate = $5, term = $6, status = $7,
                start_date = $8, updated_at = $9
            WHERE id = $10
            RETURNING *
            "#,
        )
        .bind(input.purpose)
        .bind(&input.borrower_name)
        .bind(&input.borrower_email)
        .bind(input.amount)
        .bind(input.interest_rate)
        .bind(input.term)
        .bind(input.status)
        .bind(input.start_date)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or(ApiError::NotFound("Loan not found".to_string()))?;

        Ok(loan)
    }

    /// Delete a loan by ID
    pub async fn delete_loan(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM loans WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Loan not found".to_string()));
        }

        tracing::info!(%id, "Loan deleted");

        Ok(())
    }

    /// Dashboard aggregates across all loans, unfiltered.
    ///
    /// `total_portfolio_value` is a direct sum of `amount` over every status,
    /// including paid and defaulted loans.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        let recent_loans = sqlx::query_as::<_, Loan>(
            "SELECT * FROM loans ORDER BY created_at DESC LIMIT $1",
        )
        .bind(RECENT_LOANS_COUNT)
        .fetch_all(&self.db_pool)
        .await?;

        let groups = sqlx::query_as::<_, (LoanStatus, i64, rust_decimal::Decimal)>(
            "SELECT status, COUNT(*), COALESCE(SUM(amount), 0) FROM loans GROUP BY status",
        )
        .fetch_all(&self.db_pool)
        .await?;

        let mut stats = DashboardStats {
            total_loans: 0,
            total_portfolio_value: rust_decimal::Decimal::ZERO,
            pending_count: 0,
            active_count: 0,
            paid_count: 0,
            defaulted_count: 0,
            recent_loans,
        };

        for (status, count, amount_sum) in groups {
            stats.total_loans += count;
            stats.total_portfolio_value += amount_sum;

            match status {
                LoanStatus::Pending => stats.pending_count = count,
                LoanStatus::Active => stats.active_count = count,
                LoanStatus::Paid => stats.paid_count = count,
                LoanStatus::Defaulted => stats.defaulted_count = count,
            }
        }

        Ok(stats)
    }
}
