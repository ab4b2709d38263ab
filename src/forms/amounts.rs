use serde::Deserialize;
use validator::Validate;

use crate::domain::rates::RateRule;
use crate::repository::PrestataireListQuery;

/// Batch amount calculation request: rate rules plus the same filters the
/// list endpoints accept.
#[derive(Debug, Deserialize, Validate)]
pub struct AmountRequestForm {
    #[validate(length(min = 1, message = "Aucune règle de tarif fournie"))]
    pub rules: Vec<RateRule>,
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub category: Option<String>,
}

impl AmountRequestForm {
    pub fn to_query(&self) -> PrestataireListQuery {
        PrestataireListQuery {
            campaign_id: self.campaign_id,
            form_id: self.form_id,
            province_id: self.province_id,
            zone_id: self.zone_id,
            aire_id: self.aire_id,
            category: self.category.clone(),
            ..Default::default()
        }
    }
}
