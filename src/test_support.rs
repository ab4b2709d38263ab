//! Shared fixtures for unit tests.

use chrono::Utc;

use crate::domain::audit::{AuditLog, NewAuditLog};
use crate::domain::prestataire::Prestataire;
use crate::domain::status::{KycStatus, PaymentStatus, WorkflowStatus};
use crate::models::auth::AuthenticatedUser;

pub fn user_with_role(
    role: &str,
    zone_id: Option<i32>,
    province_id: Option<i32>,
) -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "42".to_string(),
        email: format!("{role}@example.com"),
        name: format!("Test {role}"),
        roles: vec![role.to_string()],
        zone_id,
        province_id,
        exp: (Utc::now().timestamp() + 3600) as usize,
    }
}

pub fn prestataire_fixture(id: i32, zone_id: Option<i32>) -> Prestataire {
    let now = Utc::now().naive_utc();
    Prestataire {
        id,
        prestataire_id: format!("P{id:03}"),
        campaign_id: Some(1),
        form_id: Some(1),
        province_id: Some(1),
        zone_id,
        aire_id: None,
        first_name: "Marie".to_string(),
        last_name: "Kabila".to_string(),
        category: "Infirmier Titulaire".to_string(),
        phone: Some("+243810000000".to_string()),
        presence_days: 22,
        status: WorkflowStatus::Enregistre,
        validation_status: None,
        approval_status: None,
        approval_comment: None,
        kyc_status: KycStatus::NotSubmitted,
        payment_status: PaymentStatus::Unpaid,
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

pub fn prestataire_with_status(
    id: i32,
    zone_id: Option<i32>,
    status: WorkflowStatus,
) -> Prestataire {
    let mut p = prestataire_fixture(id, zone_id);
    p.status = status;
    if status != WorkflowStatus::Enregistre {
        p.validated_at = Some(Utc::now().naive_utc());
    }
    p
}

pub fn audit_log_fixture(entry: &NewAuditLog) -> AuditLog {
    AuditLog {
        id: 1,
        action: entry.action.clone(),
        actor: entry.actor.clone(),
        entity_type: entry.entity_type.clone(),
        entity_id: entry.entity_id.clone(),
        before: entry.before.clone(),
        after: entry.after.clone(),
        created_at: Utc::now().naive_utc(),
    }
}
