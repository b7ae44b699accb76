#![allow(dead_code)]

use chrono::NaiveDate;
use drivedesk_models::{
    Customer, CustomerId, CustomerLicenceCategory, LicenceCategory, LicenceCategoryId,
};
use sqlx::PgPool;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub async fn create_customer(
    pool: &PgPool,
    first_name: &str,
    last_name: &str,
    date_of_birth: NaiveDate,
) -> Customer {
    sqlx::query_as::<_, Customer>(
        r#"INSERT INTO customers (first_name, last_name, date_of_birth)
           VALUES ($1, $2, $3)
           RETURNING id, first_name, last_name, date_of_birth, created_at, updated_at"#,
    )
    .bind(first_name)
    .bind(last_name)
    .bind(date_of_birth)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_category(pool: &PgPool, code: &str, minimum_age: i32) -> LicenceCategory {
    sqlx::query_as::<_, LicenceCategory>(
        r#"INSERT INTO licence_categories (code, description, minimum_age)
           VALUES ($1, $2, $3)
           RETURNING id, code, description, minimum_age, created_at, updated_at"#,
    )
    .bind(code)
    .bind(format!("Category {}", code))
    .bind(minimum_age)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn add_requirement(
    pool: &PgPool,
    target: LicenceCategoryId,
    required: LicenceCategoryId,
    minimum_held_years: i32,
) {
    sqlx::query(
        r#"INSERT INTO required_licence_categories
               (licence_category_id, required_licence_category_id, minimum_held_years)
           VALUES ($1, $2, $3)"#,
    )
    .bind(target)
    .bind(required)
    .bind(minimum_held_years)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn add_licence(
    pool: &PgPool,
    customer: CustomerId,
    category: LicenceCategoryId,
    acquired_on: NaiveDate,
    expires_on: Option<NaiveDate>,
) -> CustomerLicenceCategory {
    sqlx::query_as::<_, CustomerLicenceCategory>(
        r#"INSERT INTO customer_licence_categories
               (customer_id, licence_category_id, acquired_on, expires_on)
           VALUES ($1, $2, $3, $4)
           RETURNING id, customer_id, licence_category_id, acquired_on, expires_on"#,
    )
    .bind(customer)
    .bind(category)
    .bind(acquired_on)
    .bind(expires_on)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_licences(
    pool: &PgPool,
    customer: CustomerId,
    category: LicenceCategoryId,
) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM customer_licence_categories WHERE customer_id = $1 AND licence_category_id = $2",
    )
    .bind(customer)
    .bind(category)
    .fetch_one(pool)
    .await
    .unwrap()
}
