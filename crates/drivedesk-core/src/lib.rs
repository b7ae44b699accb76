//! # DriveDesk Core
//!
//! Core types, rules, and errors for the DriveDesk API.
//!
//! - [`calendar`]: Calendar-year arithmetic shared by age and holding-period checks
//! - [`eligibility`]: Licence category prerequisite checks
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Single-fetch lookahead pagination
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use drivedesk_core::pagination::{SliceSource, paginate};
//! use drivedesk_core::eligibility::{Possession, meets_requirements};
//!
//! let page = paginate(&SliceSource::new(&customers), 1, 20).await?;
//!
//! let ok = meets_requirements(&requirement_source, &possessions, category_c, today).await?;
//! if !ok {
//!     return Err(AppError::conflict(anyhow::anyhow!("Prerequisites not met")));
//! }
//! ```

pub mod calendar;
pub mod eligibility;
pub mod errors;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use eligibility::{
    Possession, Requirement, RequirementError, RequirementSource, meets_requirements,
    requirements_satisfied, unmet_requirements,
};
pub use errors::AppError;
pub use pagination::{
    Page, PageParameter, PageParams, PageRequest, PageSource, PaginationError, SliceSource,
    fetch_page, paginate,
};
