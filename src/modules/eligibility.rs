//! Licence eligibility enforcement.
//!
//! [`meets_requirements`](drivedesk_core::meets_requirements) answers yes or
//! no; [`ensure_eligible`] is the service-level form that turns a "no" into a
//! `409 Conflict` listing what is missing.

use std::fmt::Display;

use chrono::NaiveDate;
use drivedesk_core::eligibility::{Possession, Requirement, RequirementSource, unmet_requirements};
use drivedesk_core::errors::AppError;
use tracing::{instrument, warn};

#[instrument(skip_all, fields(%target, %as_of))]
pub async fn ensure_eligible<S>(
    source: &S,
    possessions: &[Possession<S::CategoryId>],
    target: S::CategoryId,
    as_of: NaiveDate,
) -> Result<(), AppError>
where
    S: RequirementSource<Error = AppError> + ?Sized,
    S::CategoryId: Display,
{
    let requirements = source.requirements_for(target).await?;
    ensure_requirements_met(&requirements, possessions, target, as_of)
}

/// Same as [`ensure_eligible`] for requirements that are already loaded.
pub fn ensure_requirements_met<C>(
    requirements: &[Requirement<C>],
    possessions: &[Possession<C>],
    target: C,
    as_of: NaiveDate,
) -> Result<(), AppError>
where
    C: PartialEq + Display,
{
    let unmet = unmet_requirements(requirements, possessions, as_of);

    if unmet.is_empty() {
        return Ok(());
    }

    let missing = unmet
        .iter()
        .map(|r| {
            format!(
                "{} held for at least {} year(s)",
                r.prerequisite_category_id, r.minimum_held_years
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    warn!(unmet = unmet.len(), "prerequisites not met");

    Err(AppError::conflict(anyhow::anyhow!(
        "Prerequisites not met for licence category {}: {}",
        target,
        missing
    )))
}
