//! Licence category models.
//!
//! A [`LicenceCategory`] is a class of vehicle a customer can be licensed
//! for. [`RequiredLicenceCategory`] rows declare prerequisites between
//! categories and convert into core [`Requirement`]s;
//! [`CustomerLicenceCategory`] rows record what a customer holds and convert
//! into core [`Possession`]s.

use chrono::{DateTime, NaiveDate, Utc};
use drivedesk_core::eligibility::{Possession, Requirement, RequirementError};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::ids::{
    CustomerId, CustomerLicenceCategoryId, LicenceCategoryId, RequiredLicenceCategoryId,
};

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct LicenceCategory {
    pub id: LicenceCategoryId,
    /// Short code, e.g. `AM`, `B`, `C1E`
    pub code: String,
    pub description: Option<String>,
    /// Minimum customer age in years
    pub minimum_age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LicenceCategory {
    /// Minimum age as an unsigned year count; negative stored values mean no limit.
    pub fn minimum_age_years(&self) -> u32 {
        u32::try_from(self.minimum_age).unwrap_or(0)
    }
}

/// Holding `required_licence_category_id` for `minimum_held_years` is a
/// prerequisite for `licence_category_id`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct RequiredLicenceCategory {
    pub id: RequiredLicenceCategoryId,
    pub licence_category_id: LicenceCategoryId,
    pub required_licence_category_id: LicenceCategoryId,
    pub minimum_held_years: i32,
}

impl TryFrom<&RequiredLicenceCategory> for Requirement<LicenceCategoryId> {
    type Error = RequirementError;

    fn try_from(row: &RequiredLicenceCategory) -> Result<Self, Self::Error> {
        Requirement::try_from_stored(
            row.licence_category_id,
            row.required_licence_category_id,
            row.minimum_held_years,
        )
    }
}

/// A licence category held by a customer from `acquired_on` until
/// `expires_on` (inclusive), or indefinitely when `expires_on` is absent.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CustomerLicenceCategory {
    pub id: CustomerLicenceCategoryId,
    pub customer_id: CustomerId,
    pub licence_category_id: LicenceCategoryId,
    pub acquired_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

impl CustomerLicenceCategory {
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.acquired_on <= date && self.expires_on.is_none_or(|expiry| date <= expiry)
    }

    pub fn to_possession(&self) -> Possession<LicenceCategoryId> {
        Possession::new(self.licence_category_id, self.acquired_on)
    }
}

/// Input for granting a licence category to a customer.
#[derive(Debug, Clone, Copy)]
pub struct GrantLicence {
    pub licence_category_id: LicenceCategoryId,
    pub acquired_on: NaiveDate,
    pub expires_on: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn held(acquired_on: NaiveDate, expires_on: Option<NaiveDate>) -> CustomerLicenceCategory {
        CustomerLicenceCategory {
            id: CustomerLicenceCategoryId::new(),
            customer_id: CustomerId::new(),
            licence_category_id: LicenceCategoryId::from_u128(1),
            acquired_on,
            expires_on,
        }
    }

    #[test]
    fn test_valid_without_expiry() {
        assert!(held(date(2015, 1, 1), None).is_valid_on(date(2030, 1, 1)));
    }

    #[test]
    fn test_valid_on_expiry_day() {
        let row = held(date(2015, 1, 1), Some(date(2020, 1, 1)));
        assert!(row.is_valid_on(date(2020, 1, 1)));
        assert!(!row.is_valid_on(date(2020, 1, 2)));
    }

    #[test]
    fn test_not_valid_before_acquired() {
        assert!(!held(date(2015, 1, 1), None).is_valid_on(date(2014, 12, 31)));
    }

    #[test]
    fn test_to_possession() {
        let possession = held(date(2015, 3, 4), None).to_possession();
        assert_eq!(possession.category_id, LicenceCategoryId::from_u128(1));
        assert_eq!(possession.acquired_on, date(2015, 3, 4));
    }

    #[test]
    fn test_requirement_conversion() {
        let row = RequiredLicenceCategory {
            id: RequiredLicenceCategoryId::new(),
            licence_category_id: LicenceCategoryId::from_u128(2),
            required_licence_category_id: LicenceCategoryId::from_u128(1),
            minimum_held_years: 2,
        };

        let requirement = Requirement::<LicenceCategoryId>::try_from(&row).unwrap();
        assert_eq!(requirement.target_category_id, LicenceCategoryId::from_u128(2));
        assert_eq!(requirement.prerequisite_category_id, LicenceCategoryId::from_u128(1));
        assert_eq!(requirement.minimum_held_years, 2);
    }

    #[test]
    fn test_requirement_conversion_rejects_negative_years() {
        let row = RequiredLicenceCategory {
            id: RequiredLicenceCategoryId::new(),
            licence_category_id: LicenceCategoryId::from_u128(2),
            required_licence_category_id: LicenceCategoryId::from_u128(1),
            minimum_held_years: -3,
        };

        assert_eq!(
            Requirement::<LicenceCategoryId>::try_from(&row).unwrap_err(),
            RequirementError::NegativeHeldYears(-3)
        );
    }

    #[test]
    fn test_minimum_age_years() {
        let now = Utc::now();
        let mut category = LicenceCategory {
            id: LicenceCategoryId::new(),
            code: "B".to_string(),
            description: None,
            minimum_age: 18,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(category.minimum_age_years(), 18);

        category.minimum_age = -1;
        assert_eq!(category.minimum_age_years(), 0);
    }
}
