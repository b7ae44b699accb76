pub mod service;

pub use service::{CustomerLicenceService, CustomerService, check_grant};
