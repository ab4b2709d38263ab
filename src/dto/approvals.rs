use serde::Serialize;

/// One id that could not be transitioned, with the reason.
#[derive(Debug, Clone, Serialize)]
pub struct BatchError {
    pub id: i32,
    pub reason: String,
}

/// Outcome of a batch approve/reject/validate call.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub updated: Vec<i32>,
    pub errors: Vec<BatchError>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self {
            updated: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl Default for BatchOutcome {
    fn default() -> Self {
        Self::new()
    }
}
