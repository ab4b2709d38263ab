use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::domain::prestataire::{NewPrestataire, UpdatePrestataire};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPrestataireForm {
    /// External registration code; generated when absent.
    pub prestataire_id: Option<String>,
    #[validate(length(min = 1, message = "Le prénom est requis"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Le nom est requis"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "La catégorie est requise"))]
    pub category: String,
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 366, message = "Jours de présence invalides"))]
    pub presence_days: i32,
}

impl RegisterPrestataireForm {
    pub fn into_new_prestataire(self, default_form_id: Option<i32>) -> NewPrestataire {
        let code = self
            .prestataire_id
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(generate_code);

        NewPrestataire::new(
            code,
            self.campaign_id,
            self.form_id.or(default_form_id),
            self.province_id,
            self.zone_id,
            self.aire_id,
            self.first_name,
            self.last_name,
            self.category,
            self.phone,
            self.presence_days,
        )
    }
}

fn generate_code() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("P-{}", uuid[..8].to_uppercase())
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePrestataireForm {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    #[validate(range(min = 0, max = 366, message = "Jours de présence invalides"))]
    pub presence_days: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
}

impl From<UpdatePrestataireForm> for UpdatePrestataire {
    fn from(form: UpdatePrestataireForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            category: form.category,
            phone: form.phone,
            presence_days: form.presence_days,
            zone_id: form.zone_id,
            aire_id: form.aire_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_code_is_generated() {
        let form = RegisterPrestataireForm {
            prestataire_id: None,
            first_name: "Marie".into(),
            last_name: "Kabila".into(),
            category: "Infirmier Titulaire".into(),
            campaign_id: None,
            form_id: None,
            province_id: None,
            zone_id: None,
            aire_id: None,
            phone: None,
            presence_days: 10,
        };
        let new = form.into_new_prestataire(Some(3));
        assert!(new.prestataire_id.starts_with("P-"));
        assert_eq!(new.prestataire_id.len(), 10);
        assert_eq!(new.form_id, Some(3));
    }

    #[test]
    fn explicit_form_id_wins_over_default() {
        let form = RegisterPrestataireForm {
            prestataire_id: Some("P001".into()),
            first_name: "Marie".into(),
            last_name: "Kabila".into(),
            category: "Relais".into(),
            campaign_id: Some(1),
            form_id: Some(9),
            province_id: None,
            zone_id: None,
            aire_id: None,
            phone: None,
            presence_days: 0,
        };
        let new = form.into_new_prestataire(Some(3));
        assert_eq!(new.form_id, Some(9));
        assert_eq!(new.prestataire_id, "P001");
    }

    #[test]
    fn empty_names_fail_validation() {
        let form = RegisterPrestataireForm {
            prestataire_id: None,
            first_name: String::new(),
            last_name: "Kabila".into(),
            category: "Relais".into(),
            campaign_id: None,
            form_id: None,
            province_id: None,
            zone_id: None,
            aire_id: None,
            phone: None,
            presence_days: 0,
        };
        assert!(form.validate().is_err());
    }
}
