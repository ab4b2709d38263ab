use serde::Serialize;

use crate::reports::SkippedRow;

/// Row that parsed but could not be applied.
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub prestataire_id: String,
    pub reason: String,
}

/// Outcome of a report import, surfacing partial success to the caller.
#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub updated: usize,
    /// Rows the parser refused (bad status token, missing id).
    pub skipped: Vec<SkippedRow>,
    /// Rows that parsed but did not match a known prestataire.
    pub errors: Vec<ImportRowError>,
}
