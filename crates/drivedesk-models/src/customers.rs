//! Customer models.

use chrono::{DateTime, NaiveDate, Utc};
use drivedesk_core::calendar::meets_minimum_age;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::CustomerId;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_at_least(&self, years: u32, as_of: NaiveDate) -> bool {
        meets_minimum_age(self.date_of_birth, years, as_of)
    }
}
