use chrono::NaiveDate;
use drivedesk_config::PaginationConfig;
use drivedesk_core::eligibility::Possession;
use drivedesk_core::errors::AppError;
use drivedesk_core::pagination::{Page, PageParams, fetch_page};
use drivedesk_db::{PgPageSource, PgPool};
use drivedesk_models::{
    Customer, CustomerId, CustomerLicenceCategory, GrantLicence, LicenceCategory,
    LicenceCategoryId,
};
use tracing::{info, instrument};

use crate::modules::eligibility::ensure_requirements_met;
use crate::modules::licence_categories::{LicenceCategoryService, to_requirements};

const SELECT_CUSTOMERS: &str =
    "SELECT id, first_name, last_name, date_of_birth, created_at, updated_at FROM customers";

/// Postgres `exclusion_violation`.
const EXCLUSION_VIOLATION: &str = "23P01";

const SELECT_CUSTOMER_LICENCES: &str = "SELECT id, customer_id, licence_category_id, acquired_on, expires_on FROM customer_licence_categories";

pub struct CustomerService;

impl CustomerService {
    #[instrument(skip(db))]
    pub async fn get(db: &PgPool, id: CustomerId) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMERS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Customer not found")))
    }

    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &PageParams,
        config: &PaginationConfig,
    ) -> Result<Page<Customer>, AppError> {
        let request = params.to_request(config.default_page_size)?;
        let source = PgPageSource::<Customer>::new(
            db,
            format!("{SELECT_CUSTOMERS} ORDER BY last_name, first_name, id"),
        );

        fetch_page(&source, request).await
    }
}

pub struct CustomerLicenceService;

impl CustomerLicenceService {
    /// Licence history of a customer, oldest first.
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        customer_id: CustomerId,
        params: &PageParams,
        config: &PaginationConfig,
    ) -> Result<Page<CustomerLicenceCategory>, AppError> {
        let request = params.to_request(config.default_page_size)?;
        CustomerService::get(db, customer_id).await?;

        let source = PgPageSource::<CustomerLicenceCategory>::new(
            db,
            format!("{SELECT_CUSTOMER_LICENCES} WHERE customer_id = $1 ORDER BY acquired_on, id"),
        )
        .bind(customer_id);

        fetch_page(&source, request).await
    }

    /// Categories the customer holds on `as_of`, as checker input.
    #[instrument(skip(db))]
    pub async fn active_possessions(
        db: &PgPool,
        customer_id: CustomerId,
        as_of: NaiveDate,
    ) -> Result<Vec<Possession<LicenceCategoryId>>, AppError> {
        let rows = sqlx::query_as::<_, CustomerLicenceCategory>(&format!(
            "{SELECT_CUSTOMER_LICENCES} \
             WHERE customer_id = $1 AND acquired_on <= $2 \
             AND (expires_on IS NULL OR expires_on >= $2) \
             ORDER BY acquired_on, id"
        ))
        .bind(customer_id)
        .bind(as_of)
        .fetch_all(db)
        .await?;

        Ok(rows.iter().map(CustomerLicenceCategory::to_possession).collect())
    }

    /// Records that a customer holds a licence category.
    ///
    /// Checks run in order: customer and category exist, dates are coherent,
    /// age, not already held on `as_of`, prerequisites. The customer row is
    /// locked for the whole transaction so concurrent grants for the same
    /// customer are checked one after another.
    #[instrument(skip(db))]
    pub async fn grant(
        db: &PgPool,
        customer_id: CustomerId,
        grant: GrantLicence,
        as_of: NaiveDate,
    ) -> Result<CustomerLicenceCategory, AppError> {
        let mut tx = db.begin().await?;

        let customer =
            sqlx::query_as::<_, Customer>(&format!("{SELECT_CUSTOMERS} WHERE id = $1 FOR UPDATE"))
                .bind(customer_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Customer not found")))?;

        let category = LicenceCategoryService::get(&mut *tx, grant.licence_category_id).await?;

        let held = sqlx::query_as::<_, CustomerLicenceCategory>(&format!(
            "{SELECT_CUSTOMER_LICENCES} WHERE customer_id = $1 ORDER BY acquired_on, id"
        ))
        .bind(customer_id)
        .fetch_all(&mut *tx)
        .await?;

        check_grant(&customer, &category, &held, &grant, as_of)?;

        let possessions: Vec<_> = held
            .iter()
            .filter(|row| row.is_valid_on(as_of))
            .map(CustomerLicenceCategory::to_possession)
            .collect();

        let stored = LicenceCategoryService::requirements(&mut *tx, category.id).await?;
        ensure_requirements_met(&to_requirements(&stored)?, &possessions, category.id, as_of)?;

        let row = sqlx::query_as::<_, CustomerLicenceCategory>(
            r#"INSERT INTO customer_licence_categories
                   (customer_id, licence_category_id, acquired_on, expires_on)
               VALUES ($1, $2, $3, $4)
               RETURNING id, customer_id, licence_category_id, acquired_on, expires_on"#,
        )
        .bind(customer_id)
        .bind(category.id)
        .bind(grant.acquired_on)
        .bind(grant.expires_on)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.code().as_deref() == Some(EXCLUSION_VIOLATION)
            {
                return AppError::conflict(anyhow::anyhow!(
                    "Licence category {} overlaps a period the customer already holds",
                    category.code
                ));
            }
            AppError::from(e)
        })?;

        tx.commit().await?;

        info!(licence_id = %row.id, code = %category.code, "licence category granted");

        Ok(row)
    }
}

/// Grant rules that depend only on already loaded rows.
pub fn check_grant(
    customer: &Customer,
    category: &LicenceCategory,
    held: &[CustomerLicenceCategory],
    grant: &GrantLicence,
    as_of: NaiveDate,
) -> Result<(), AppError> {
    if let Some(expires_on) = grant.expires_on
        && expires_on < grant.acquired_on
    {
        return Err(AppError::bad_request(anyhow::anyhow!(
            "expiresOn must not be before acquiredOn"
        )));
    }

    let minimum_age = category.minimum_age_years();
    if !customer.is_at_least(minimum_age, as_of) {
        return Err(AppError::conflict(anyhow::anyhow!(
            "Customer must be at least {} years old for licence category {}",
            minimum_age,
            category.code
        )));
    }

    let already_held = held
        .iter()
        .any(|row| row.licence_category_id == category.id && row.is_valid_on(as_of));
    if already_held {
        return Err(AppError::conflict(anyhow::anyhow!(
            "Customer already holds licence category {}",
            category.code
        )));
    }

    Ok(())
}
