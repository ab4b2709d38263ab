use serde::Serialize;

/// Outcome of a batch amount calculation.
#[derive(Debug, Serialize)]
pub struct AmountSummary {
    pub updated: usize,
    /// Distinct categories no rate rule matched.
    pub unmatched_categories: Vec<String>,
}
