//! Postgres-backed page source.
//!
//! [`PgPageSource`] wraps a `SELECT` statement and appends `LIMIT`/`OFFSET`
//! placeholders for each range fetch. The statement must carry its own
//! `ORDER BY` over a unique key; rows are returned in whatever order it
//! defines.
//!
//! ```ignore
//! let source = PgPageSource::<CustomerLicenceCategory>::new(
//!     &db,
//!     "SELECT * FROM customer_licence_categories WHERE customer_id = $1 ORDER BY acquired_on, id",
//! )
//! .bind(customer_id);
//!
//! let page = paginate(&source, 1, 20).await?;
//! ```

use std::marker::PhantomData;

use async_trait::async_trait;
use drivedesk_core::errors::AppError;
use drivedesk_core::pagination::PageSource;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

pub struct PgPageSource<'a, T> {
    db: &'a PgPool,
    sql: String,
    binds: Vec<Uuid>,
    _row: PhantomData<fn() -> T>,
}

impl<'a, T> PgPageSource<'a, T> {
    /// `sql` may reference `$1..$n` for values added with [`bind`](Self::bind).
    pub fn new(db: &'a PgPool, sql: impl Into<String>) -> Self {
        Self {
            db,
            sql: sql.into(),
            binds: Vec::new(),
            _row: PhantomData,
        }
    }

    pub fn bind(mut self, value: impl Into<Uuid>) -> Self {
        self.binds.push(value.into());
        self
    }
}

/// Appends range placeholders numbered after the `bind_count` existing ones.
pub fn range_query(sql: &str, bind_count: usize) -> String {
    let base = sql.trim_end().trim_end_matches(';').trim_end();
    format!(
        "{} LIMIT ${} OFFSET ${}",
        base,
        bind_count + 1,
        bind_count + 2
    )
}

#[async_trait]
impl<'a, T> PageSource for PgPageSource<'a, T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    type Item = T;
    type Error = AppError;

    async fn fetch_range(&self, offset: i64, limit: i64) -> Result<Vec<T>, AppError> {
        let sql = range_query(&self.sql, self.binds.len());

        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in &self.binds {
            query = query.bind(*value);
        }

        query
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db)
            .await
            .map_err(AppError::database)
    }
}
