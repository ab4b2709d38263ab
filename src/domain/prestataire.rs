use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::status::{
    derive_effective_status, EffectiveStatus, KycStatus, PaymentStatus, RawStatuses,
    WorkflowStatus,
};

/// A healthcare provider receiving a stipend.
///
/// Lifecycle is status-driven: records are created on registration import and
/// mutated by IT validation, MCZ approval, KYC import and payment import, but
/// never hard-deleted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Prestataire {
    pub id: i32,
    /// External registration code, e.g. `P001`.
    pub prestataire_id: String,
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone: Option<String>,
    pub presence_days: i32,
    pub status: WorkflowStatus,
    /// Legacy free-form fields kept verbatim from historical imports.
    pub validation_status: Option<String>,
    pub approval_status: Option<String>,
    pub approval_comment: Option<String>,
    pub kyc_status: KycStatus,
    pub payment_status: PaymentStatus,
    pub payment_amount: Option<f64>,
    pub payment_currency: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub payment_reference: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub account_operator: Option<String>,
    pub kyc_verified_date: Option<NaiveDate>,
    pub validated_at: Option<NaiveDateTime>,
    pub approved_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Prestataire {
    /// Effective status across canonical and legacy fields.
    pub fn effective_status(&self) -> EffectiveStatus {
        derive_effective_status(&RawStatuses {
            approval_status: self.approval_status.as_deref(),
            status: Some(self.status.as_str()),
            validation_status: self.validation_status.as_deref(),
            validated_at: self.validated_at,
        })
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPrestataire {
    pub prestataire_id: String,
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub category: String,
    pub phone: Option<String>,
    pub presence_days: i32,
}

impl NewPrestataire {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        prestataire_id: String,
        campaign_id: Option<i32>,
        form_id: Option<i32>,
        province_id: Option<i32>,
        zone_id: Option<i32>,
        aire_id: Option<i32>,
        first_name: String,
        last_name: String,
        category: String,
        phone: Option<String>,
        presence_days: i32,
    ) -> Self {
        Self {
            prestataire_id: prestataire_id.trim().to_string(),
            campaign_id,
            form_id,
            province_id,
            zone_id,
            aire_id,
            first_name: first_name.trim().to_string(),
            last_name: last_name.trim().to_string(),
            category: category.trim().to_string(),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            presence_days: presence_days.max(0),
        }
    }
}

/// Field updates applied by the registration edit form.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UpdatePrestataire {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub presence_days: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
}

/// Normalized row produced by the payment report importer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PaymentUpdate {
    pub prestataire_id: String,
    pub status: PaymentStatus,
    pub payment_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub reference: Option<String>,
}

/// Normalized row produced by the KYC report importer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KycUpdate {
    pub prestataire_id: String,
    pub status: KycStatus,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub operator: Option<String>,
    pub verified_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_prestataire_trims_and_drops_empty_phone() {
        let p = NewPrestataire::new(
            " P001 ".into(),
            None,
            None,
            None,
            None,
            None,
            "  Marie ".into(),
            " Kabila ".into(),
            " Infirmier Titulaire ".into(),
            Some("   ".into()),
            -3,
        );
        assert_eq!(p.prestataire_id, "P001");
        assert_eq!(p.first_name, "Marie");
        assert_eq!(p.category, "Infirmier Titulaire");
        assert_eq!(p.phone, None);
        assert_eq!(p.presence_days, 0);
    }
}
