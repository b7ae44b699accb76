//! Prerequisite checks for licence categories.
//!
//! A target category may declare any number of [`Requirement`]s, each naming
//! a prerequisite category and how many years it must have been held. An
//! owner qualifies only if *every* requirement is matched by at least one of
//! their [`Possession`]s that has been held long enough as of the evaluation
//! date. A category with no requirements is open to everyone.
//!
//! Possessions are supplied by the caller, already filtered to the ones still
//! valid on the evaluation date. Requirements are looked up through a
//! [`RequirementSource`], whose errors (such as an unknown category) are
//! returned unchanged.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::calendar::held_for_at_least;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RequirementError {
    #[error("minimum held years cannot be negative (got {0})")]
    NegativeHeldYears(i32),
}

/// A category held by an owner since `acquired_on`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Possession<C> {
    pub category_id: C,
    pub acquired_on: NaiveDate,
}

impl<C> Possession<C> {
    pub fn new(category_id: C, acquired_on: NaiveDate) -> Self {
        Self {
            category_id,
            acquired_on,
        }
    }
}

/// To qualify for `target_category_id`, `prerequisite_category_id` must have
/// been held for at least `minimum_held_years`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Requirement<C> {
    pub target_category_id: C,
    pub prerequisite_category_id: C,
    pub minimum_held_years: u32,
}

impl<C> Requirement<C> {
    pub fn new(target_category_id: C, prerequisite_category_id: C, minimum_held_years: u32) -> Self {
        Self {
            target_category_id,
            prerequisite_category_id,
            minimum_held_years,
        }
    }

    /// Builds a requirement from a stored, signed year count.
    pub fn try_from_stored(
        target_category_id: C,
        prerequisite_category_id: C,
        minimum_held_years: i32,
    ) -> Result<Self, RequirementError> {
        let years = u32::try_from(minimum_held_years)
            .map_err(|_| RequirementError::NegativeHeldYears(minimum_held_years))?;

        Ok(Self::new(target_category_id, prerequisite_category_id, years))
    }
}

impl<C: PartialEq> Requirement<C> {
    pub fn is_met_by(&self, possession: &Possession<C>, as_of: NaiveDate) -> bool {
        possession.category_id == self.prerequisite_category_id
            && held_for_at_least(possession.acquired_on, self.minimum_held_years, as_of)
    }
}

/// Looks up the requirements declared for a target category.
#[async_trait]
pub trait RequirementSource: Send + Sync {
    type CategoryId: Copy + PartialEq + Send + Sync;
    type Error: Send;

    /// Returns every requirement whose target is `target`.
    ///
    /// Implementations should fail (rather than return an empty list) when
    /// `target` does not exist.
    async fn requirements_for(
        &self,
        target: Self::CategoryId,
    ) -> Result<Vec<Requirement<Self::CategoryId>>, Self::Error>;
}

/// Requirements with no qualifying possession, in declaration order.
pub fn unmet_requirements<'r, C: PartialEq>(
    requirements: &'r [Requirement<C>],
    possessions: &[Possession<C>],
    as_of: NaiveDate,
) -> Vec<&'r Requirement<C>> {
    requirements
        .iter()
        .filter(|requirement| !possessions.iter().any(|p| requirement.is_met_by(p, as_of)))
        .collect()
}

pub fn requirements_satisfied<C: PartialEq>(
    requirements: &[Requirement<C>],
    possessions: &[Possession<C>],
    as_of: NaiveDate,
) -> bool {
    requirements
        .iter()
        .all(|requirement| possessions.iter().any(|p| requirement.is_met_by(p, as_of)))
}

/// Whether `possessions` satisfy every requirement of `target` as of `as_of`.
#[instrument(skip_all, fields(possessions = possessions.len(), %as_of))]
pub async fn meets_requirements<S>(
    source: &S,
    possessions: &[Possession<S::CategoryId>],
    target: S::CategoryId,
    as_of: NaiveDate,
) -> Result<bool, S::Error>
where
    S: RequirementSource + ?Sized,
{
    let requirements = source.requirements_for(target).await?;

    if requirements.is_empty() {
        debug!("no requirements declared");
        return Ok(true);
    }

    let satisfied = requirements_satisfied(&requirements, possessions, as_of);
    debug!(requirements = requirements.len(), satisfied, "requirements evaluated");

    Ok(satisfied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_is_met_by_requires_matching_category() {
        let requirement = Requirement::new(2, 1, 1);
        let possession = Possession::new(3, date(2000, 1, 1));
        assert!(!requirement.is_met_by(&possession, date(2020, 1, 1)));
    }

    #[test]
    fn test_is_met_by_requires_duration() {
        let requirement = Requirement::new(2, 1, 2);
        assert!(requirement.is_met_by(&Possession::new(1, date(2018, 1, 1)), date(2020, 1, 1)));
        assert!(!requirement.is_met_by(&Possession::new(1, date(2018, 1, 2)), date(2020, 1, 1)));
    }

    #[test]
    fn test_try_from_stored_rejects_negative() {
        let err = Requirement::try_from_stored(2, 1, -1).unwrap_err();
        assert_eq!(err, RequirementError::NegativeHeldYears(-1));
    }

    #[test]
    fn test_try_from_stored_accepts_zero() {
        let requirement = Requirement::try_from_stored(2, 1, 0).unwrap();
        assert_eq!(requirement.minimum_held_years, 0);
    }

    #[test]
    fn test_satisfied_with_no_requirements() {
        let requirements: Vec<Requirement<u32>> = Vec::new();
        assert!(requirements_satisfied(&requirements, &[], date(2020, 1, 1)));
    }

    #[test]
    fn test_partial_satisfaction_fails() {
        let requirements = vec![Requirement::new(9, 1, 1), Requirement::new(9, 2, 1)];
        let possessions = vec![Possession::new(1, date(2010, 1, 1))];
        let as_of = date(2020, 1, 1);

        assert!(!requirements_satisfied(&requirements, &possessions, as_of));

        let unmet = unmet_requirements(&requirements, &possessions, as_of);
        assert_eq!(unmet, vec![&requirements[1]]);
    }

    #[test]
    fn test_any_possession_may_satisfy() {
        let requirements = vec![Requirement::new(9, 1, 3)];
        let possessions = vec![
            Possession::new(1, date(2019, 6, 1)),
            Possession::new(1, date(2012, 6, 1)),
        ];

        assert!(requirements_satisfied(&requirements, &possessions, date(2020, 1, 1)));
    }
}
