use async_trait::async_trait;
use drivedesk_config::PaginationConfig;
use drivedesk_core::eligibility::{Requirement, RequirementSource};
use drivedesk_core::errors::AppError;
use drivedesk_core::pagination::{Page, PageParams, fetch_page};
use drivedesk_db::{PgPageSource, PgPool};
use drivedesk_models::{
    LicenceCategory, LicenceCategoryId, RequiredLicenceCategory, RequiredLicenceCategoryId,
};
use sqlx::{Executor, FromRow, Postgres};
use tracing::instrument;

const SELECT_CATEGORIES: &str =
    "SELECT id, code, description, minimum_age, created_at, updated_at FROM licence_categories";

/// One row per prerequisite, or a single all-null row when the category
/// exists without prerequisites. No rows means the category does not exist.
#[derive(Debug, FromRow)]
struct CategoryRequirementRow {
    id: Option<RequiredLicenceCategoryId>,
    licence_category_id: Option<LicenceCategoryId>,
    required_licence_category_id: Option<LicenceCategoryId>,
    minimum_held_years: Option<i32>,
}

impl CategoryRequirementRow {
    fn into_requirement(self) -> Option<RequiredLicenceCategory> {
        Some(RequiredLicenceCategory {
            id: self.id?,
            licence_category_id: self.licence_category_id?,
            required_licence_category_id: self.required_licence_category_id?,
            minimum_held_years: self.minimum_held_years?,
        })
    }
}

pub struct LicenceCategoryService;

impl LicenceCategoryService {
    #[instrument(skip(db))]
    pub async fn list(
        db: &PgPool,
        params: &PageParams,
        config: &PaginationConfig,
    ) -> Result<Page<LicenceCategory>, AppError> {
        let request = params.to_request(config.default_page_size)?;
        let source = PgPageSource::<LicenceCategory>::new(
            db,
            format!("{SELECT_CATEGORIES} ORDER BY code, id"),
        );

        fetch_page(&source, request).await
    }

    #[instrument(skip(executor))]
    pub async fn get<'e, E>(executor: E, id: LicenceCategoryId) -> Result<LicenceCategory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, LicenceCategory>(&format!("{SELECT_CATEGORIES} WHERE id = $1"))
            .bind(id)
            .fetch_optional(executor)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Licence category not found")))
    }

    /// Prerequisites declared for `id`, read in a single query; fails with
    /// 404 if the category does not exist.
    #[instrument(skip(executor))]
    pub async fn requirements<'e, E>(
        executor: E,
        id: LicenceCategoryId,
    ) -> Result<Vec<RequiredLicenceCategory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rows = sqlx::query_as::<_, CategoryRequirementRow>(
            r#"SELECT r.id, r.licence_category_id, r.required_licence_category_id, r.minimum_held_years
               FROM licence_categories c
               LEFT JOIN required_licence_categories r ON r.licence_category_id = c.id
               WHERE c.id = $1
               ORDER BY r.required_licence_category_id"#,
        )
        .bind(id)
        .fetch_all(executor)
        .await?;

        if rows.is_empty() {
            return Err(AppError::not_found(anyhow::anyhow!(
                "Licence category not found"
            )));
        }

        Ok(rows
            .into_iter()
            .filter_map(CategoryRequirementRow::into_requirement)
            .collect())
    }
}

/// Converts stored prerequisite rows into checker input.
pub fn to_requirements(
    rows: &[RequiredLicenceCategory],
) -> Result<Vec<Requirement<LicenceCategoryId>>, AppError> {
    rows.iter()
        .map(|row| Requirement::<LicenceCategoryId>::try_from(row).map_err(AppError::internal))
        .collect()
}

/// Reads licence category prerequisites from Postgres.
#[derive(Clone, Copy)]
pub struct PgRequirementSource<'a> {
    db: &'a PgPool,
}

impl<'a> PgRequirementSource<'a> {
    pub fn new(db: &'a PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl<'a> RequirementSource for PgRequirementSource<'a> {
    type CategoryId = LicenceCategoryId;
    type Error = AppError;

    async fn requirements_for(
        &self,
        target: LicenceCategoryId,
    ) -> Result<Vec<Requirement<LicenceCategoryId>>, AppError> {
        let rows = LicenceCategoryService::requirements(self.db, target).await?;
        to_requirements(&rows)
    }
}
