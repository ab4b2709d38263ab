//! DTO modules that bridge services with the JSON API.

pub mod amounts;
pub mod approvals;
pub mod imports;
pub mod prestataires;
pub mod stats;
