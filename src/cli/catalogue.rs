//! Standard licence category catalogue.
//!
//! Categories follow the European driving licence classes. Seeding is
//! idempotent: categories are keyed by code and prerequisites by
//! (target, prerequisite) pair, so existing rows are left untouched.

use std::time::Instant;

use drivedesk_core::errors::AppError;
use drivedesk_db::PgPool;
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategorySeed {
    pub code: &'static str,
    pub description: &'static str,
    pub minimum_age: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrerequisiteSeed {
    pub target: &'static str,
    pub required: &'static str,
    pub minimum_held_years: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories_inserted: u64,
    pub prerequisites_inserted: u64,
}

const fn category(code: &'static str, description: &'static str, minimum_age: i32) -> CategorySeed {
    CategorySeed {
        code,
        description,
        minimum_age,
    }
}

const fn prerequisite(
    target: &'static str,
    required: &'static str,
    minimum_held_years: i32,
) -> PrerequisiteSeed {
    PrerequisiteSeed {
        target,
        required,
        minimum_held_years,
    }
}

pub const STANDARD_CATEGORIES: &[CategorySeed] = &[
    category("AM", "Mopeds and light quadricycles", 16),
    category("A1", "Light motorcycles up to 125 cc", 16),
    category("A2", "Motorcycles up to 35 kW", 18),
    category("A", "Motorcycles", 20),
    category("B", "Cars up to 3500 kg", 18),
    category("BE", "Cars with a heavy trailer", 18),
    category("C1", "Medium goods vehicles up to 7500 kg", 18),
    category("C1E", "Medium goods vehicles with a trailer", 18),
    category("C", "Large goods vehicles", 21),
    category("CE", "Large goods vehicles with a trailer", 21),
    category("D1", "Minibuses up to 16 passengers", 21),
    category("D1E", "Minibuses with a trailer", 21),
    category("D", "Buses", 24),
    category("DE", "Buses with a trailer", 24),
];

pub const STANDARD_PREREQUISITES: &[PrerequisiteSeed] = &[
    prerequisite("A", "A2", 2),
    prerequisite("BE", "B", 0),
    prerequisite("C1", "B", 0),
    prerequisite("C1E", "C1", 0),
    prerequisite("C", "B", 0),
    prerequisite("CE", "C", 0),
    prerequisite("D1", "B", 0),
    prerequisite("D1E", "D1", 0),
    prerequisite("D", "B", 0),
    prerequisite("DE", "D", 0),
];

/// Inserts the standard catalogue in a single transaction.
#[instrument(skip(db))]
pub async fn seed_licence_categories(db: &PgPool) -> Result<SeedSummary, AppError> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();
    let mut tx = db.begin().await?;

    for seed in STANDARD_CATEGORIES {
        let result = sqlx::query(
            r#"INSERT INTO licence_categories (code, description, minimum_age)
               VALUES ($1, $2, $3)
               ON CONFLICT (code) DO NOTHING"#,
        )
        .bind(seed.code)
        .bind(seed.description)
        .bind(seed.minimum_age)
        .execute(&mut *tx)
        .await?;

        summary.categories_inserted += result.rows_affected();
    }

    for seed in STANDARD_PREREQUISITES {
        let result = sqlx::query(
            r#"INSERT INTO required_licence_categories
                   (licence_category_id, required_licence_category_id, minimum_held_years)
               SELECT target.id, required.id, $3
               FROM licence_categories target, licence_categories required
               WHERE target.code = $1 AND required.code = $2
               ON CONFLICT (licence_category_id, required_licence_category_id) DO NOTHING"#,
        )
        .bind(seed.target)
        .bind(seed.required)
        .bind(seed.minimum_held_years)
        .execute(&mut *tx)
        .await?;

        summary.prerequisites_inserted += result.rows_affected();
    }

    tx.commit().await?;

    info!(
        categories = summary.categories_inserted,
        prerequisites = summary.prerequisites_inserted,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "licence categories seeded"
    );

    Ok(summary)
}
