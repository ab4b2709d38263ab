use serde::Deserialize;
use validator::Validate;

use crate::domain::campaign::{NewCampaign, NewForm};

#[derive(Debug, Deserialize, Validate)]
pub struct CampaignForm {
    #[validate(length(min = 1, message = "Le nom de la campagne est requis"))]
    pub name: String,
    pub enregistrement_form_id: Option<i32>,
    #[serde(default)]
    pub active: bool,
}

impl From<CampaignForm> for NewCampaign {
    fn from(form: CampaignForm) -> Self {
        NewCampaign::new(form.name, form.enregistrement_form_id, form.active)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct FormForm {
    pub campaign_id: i32,
    #[validate(length(min = 1, message = "Le nom du formulaire est requis"))]
    pub name: String,
    #[validate(length(min = 1, message = "Le type du formulaire est requis"))]
    pub kind: String,
    #[serde(default = "default_version")]
    pub version: i32,
}

fn default_version() -> i32 {
    1
}

impl From<FormForm> for NewForm {
    fn from(form: FormForm) -> Self {
        NewForm {
            campaign_id: form.campaign_id,
            name: form.name.trim().to_string(),
            kind: form.kind.trim().to_string(),
            version: form.version,
        }
    }
}
