pub mod customers;
pub mod eligibility;
pub mod licence_categories;

pub use customers::{CustomerLicenceService, CustomerService};
pub use eligibility::{ensure_eligible, ensure_requirements_met};
pub use licence_categories::{LicenceCategoryService, PgRequirementSource};
