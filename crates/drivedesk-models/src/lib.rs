//! # DriveDesk Models
//!
//! Database rows and strongly typed IDs for DriveDesk.
//!
//! - [`customers`]: Customers (learner drivers)
//! - [`ids`]: Entity ID newtypes
//! - [`licence_categories`]: Licence categories, their prerequisites, and
//!   the categories customers hold
//!
//! Rows convert into the core eligibility types:
//!
//! ```ignore
//! use drivedesk_core::eligibility::{Possession, Requirement};
//!
//! let possessions: Vec<Possession<LicenceCategoryId>> =
//!     held.iter().filter(|h| h.is_valid_on(today)).map(|h| h.to_possession()).collect();
//! let requirement = Requirement::try_from(&required_row)?;
//! ```

pub mod customers;
pub mod ids;
pub mod licence_categories;

pub use customers::Customer;
pub use ids::{CustomerId, CustomerLicenceCategoryId, LicenceCategoryId, RequiredLicenceCategoryId};
pub use licence_categories::{
    CustomerLicenceCategory, GrantLicence, LicenceCategory, RequiredLicenceCategory,
};
