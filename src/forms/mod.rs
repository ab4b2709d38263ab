//! Request payloads accepted by the HTTP routes.

pub mod amounts;
pub mod approvals;
pub mod campaigns;
pub mod imports;
pub mod prestataires;
