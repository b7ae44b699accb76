pub mod service;

pub use service::{LicenceCategoryService, PgRequirementSource, to_requirements};
