//! Administrative commands backing the `drivedesk-cli` binary.

pub mod catalogue;

pub use catalogue::{SeedSummary, seed_licence_categories};
