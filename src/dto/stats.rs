use serde::Serialize;

/// Per-status counters for one scope (a zone or the whole selection).
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct StatusBreakdown {
    pub total: usize,
    pub pending: usize,
    pub validated: usize,
    pub approved: usize,
    pub rejected: usize,
    pub paid: usize,
    pub kyc_verified: usize,
}

#[derive(Debug, Serialize)]
pub struct ZoneSummary {
    pub zone_id: Option<i32>,
    #[serde(flatten)]
    pub breakdown: StatusBreakdown,
}

/// Dashboard summary: overall counters plus a per-zone split.
#[derive(Debug, Serialize)]
pub struct StatsSummary {
    #[serde(flatten)]
    pub overall: StatusBreakdown,
    pub zones: Vec<ZoneSummary>,
}
