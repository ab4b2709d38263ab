use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Grouping of data-collection instruments for one payment round.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: i32,
    pub name: String,
    /// Form used for registrations; drives the auto-selected active form.
    pub enregistrement_form_id: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCampaign {
    pub name: String,
    pub enregistrement_form_id: Option<i32>,
    pub active: bool,
}

impl NewCampaign {
    #[must_use]
    pub fn new(name: String, enregistrement_form_id: Option<i32>, active: bool) -> Self {
        Self {
            name: name.trim().to_string(),
            enregistrement_form_id,
            active,
        }
    }
}

/// Versioned data-collection instrument belonging to a campaign.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Form {
    pub id: i32,
    pub campaign_id: i32,
    pub name: String,
    pub kind: String,
    pub version: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewForm {
    pub campaign_id: i32,
    pub name: String,
    pub kind: String,
    pub version: i32,
}
