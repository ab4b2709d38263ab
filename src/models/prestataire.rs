use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::prestataire::{
    NewPrestataire as DomainNewPrestataire, Prestataire as DomainPrestataire,
    UpdatePrestataire as DomainUpdatePrestataire,
};
use crate::domain::status::{KycStatus, PaymentStatus, WorkflowStatus};

#[derive(Debug, Clone, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = crate::schema::prestataires)]
/// Diesel model for [`crate::domain::prestataire::Prestataire`].
pub struct Prestataire {
    pub id: i32,
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
    pub status: String,
    pub validation_status: Option<String>,
    pub approval_status: Option<String>,
    pub approval_comment: Option<String>,
    pub kyc_status: String,
    pub payment_status: String,
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::prestataires)]
/// Insertable form of [`Prestataire`]; workflow columns take their
/// schema defaults.
pub struct NewPrestataire<'a> {
    pub prestataire_id: &'a str,
    pub campaign_id: Option<i32>,
    pub form_id: Option<i32>,
    pub province_id: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub category: &'a str,
    pub phone: Option<&'a str>,
    pub presence_days: i32,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::prestataires)]
/// Data used when updating registration fields of a [`Prestataire`].
pub struct UpdatePrestataire<'a> {
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub category: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub presence_days: Option<i32>,
    pub zone_id: Option<i32>,
    pub aire_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl From<Prestataire> for DomainPrestataire {
    fn from(p: Prestataire) -> Self {
        Self {
            id: p.id,
            campaign_id: p.campaign_id,
            form_id: p.form_id,
            province_id: p.province_id,
            zone_id: p.zone_id,
            aire_id: p.aire_id,
            first_name: p.first_name,
            last_name: p.last_name,
            category: p.category,
            phone: p.phone,
            presence_days: p.presence_days,
            status: WorkflowStatus::parse(&p.status).unwrap_or_default(),
            validation_status: p.validation_status,
            approval_status: p.approval_status,
            approval_comment: p.approval_comment,
            kyc_status: KycStatus::parse(&p.kyc_status).unwrap_or_default(),
            payment_status: PaymentStatus::parse(&p.payment_status).unwrap_or_default(),
            payment_amount: p.payment_amount,
            payment_currency: p.payment_currency,
            payment_date: p.payment_date,
            payment_reference: p.payment_reference,
            account_number: p.account_number,
            account_name: p.account_name,
            account_operator: p.account_operator,
            kyc_verified_date: p.kyc_verified_date,
            validated_at: p.validated_at,
            approved_at: p.approved_at,
            created_at: p.created_at,
            updated_at: p.updated_at,
            prestataire_id: p.prestataire_id,
        }
    }
}

impl<'a> From<&'a DomainNewPrestataire> for NewPrestataire<'a> {
    fn from(p: &'a DomainNewPrestataire) -> Self {
        Self {
            prestataire_id: p.prestataire_id.as_str(),
            campaign_id: p.campaign_id,
            form_id: p.form_id,
            province_id: p.province_id,
            zone_id: p.zone_id,
            aire_id: p.aire_id,
            first_name: p.first_name.as_str(),
            last_name: p.last_name.as_str(),
            category: p.category.as_str(),
            phone: p.phone.as_deref(),
            presence_days: p.presence_days,
        }
    }
}

impl<'a> From<&'a DomainUpdatePrestataire> for UpdatePrestataire<'a> {
    fn from(p: &'a DomainUpdatePrestataire) -> Self {
        Self {
            first_name: p.first_name.as_deref(),
            last_name: p.last_name.as_deref(),
            category: p.category.as_deref(),
            phone: p.phone.as_deref(),
            presence_days: p.presence_days,
            zone_id: p.zone_id,
            aire_id: p.aire_id,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::EffectiveStatus;
    use chrono::Utc;

    fn sample_db(status: &str, approval: Option<&str>) -> Prestataire {
        let now = Utc::now().naive_utc();
        Prestataire {
            id: 1,
            prestataire_id: "P001".into(),
            campaign_id: Some(1),
            form_id: None,
            province_id: Some(1),
            zone_id: Some(2),
            aire_id: Some(3),
            first_name: "Marie".into(),
            last_name: "Kabila".into(),
            category: "Infirmier Titulaire".into(),
            phone: Some("+243810000000".into()),
            presence_days: 10,
            status: status.into(),
            validation_status: None,
            approval_status: approval.map(Into::into),
            approval_comment: None,
            kyc_status: "NOT_SUBMITTED".into(),
            payment_status: "UNPAID".into(),
            payment_amount: None,
            payment_currency: None,
            payment_date: None,
            payment_reference: None,
            account_number: None,
            account_name: None,
            account_operator: None,
            kyc_verified_date: None,
            validated_at: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn db_row_converts_to_domain_with_parsed_statuses() {
        let domain: DomainPrestataire = sample_db("VALIDE_PAR_IT", None).into();
        assert_eq!(domain.status, WorkflowStatus::ValideParIt);
        assert_eq!(domain.kyc_status, KycStatus::NotSubmitted);
        assert_eq!(domain.effective_status(), EffectiveStatus::ValidatedByIt);
    }

    #[test]
    fn unknown_status_token_falls_back_to_registered() {
        let domain: DomainPrestataire = sample_db("SOMETHING_ELSE", None).into();
        assert_eq!(domain.status, WorkflowStatus::Enregistre);
    }

    #[test]
    fn legacy_approval_field_survives_conversion() {
        let domain: DomainPrestataire = sample_db("ENREGISTRE", Some("APPROVED")).into();
        assert_eq!(domain.effective_status(), EffectiveStatus::Approved);
    }
}
