//! Campaign and form administration.

use validator::Validate;

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::domain::campaign::{Campaign, Form};
use crate::forms::campaigns::{CampaignForm, FormForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuditLogWriter, CampaignReader, CampaignWriter};
use crate::services::prestataires::{first_validation_message, ALL_ROLES};
use crate::services::{ensure_any_role, ensure_role, ServiceError, ServiceResult};
use crate::SERVICE_ADMIN_ROLE;

pub fn list_campaigns<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Campaign>>
where
    R: CampaignReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;
    Ok(repo.list_campaigns()?)
}

pub fn list_forms<R>(
    repo: &R,
    user: &AuthenticatedUser,
    campaign_id: i32,
) -> ServiceResult<Vec<Form>>
where
    R: CampaignReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;
    if repo.get_campaign_by_id(campaign_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }
    Ok(repo.list_forms(campaign_id)?)
}

pub fn create_campaign<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CampaignForm,
) -> ServiceResult<Campaign>
where
    R: CampaignWriter + AuditLogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    let campaign = repo.create_campaign(&form.into())?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Create,
            &user.email,
            "campaign",
            campaign.id.to_string(),
        )
        .snapshots(None, serde_json::to_value(&campaign).ok()),
    )?;

    Ok(campaign)
}

pub fn create_form<R>(repo: &R, user: &AuthenticatedUser, form: FormForm) -> ServiceResult<Form>
where
    R: CampaignReader + CampaignWriter + AuditLogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    if repo.get_campaign_by_id(form.campaign_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let created = repo.create_form(&form.into())?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Create,
            &user.email,
            "form",
            created.id.to_string(),
        )
        .snapshots(None, serde_json::to_value(&created).ok()),
    )?;

    Ok(created)
}

/// Marks one campaign as active; all others are deactivated. New
/// registrations default to the active campaign's enregistrement form.
pub fn activate_campaign<R>(
    repo: &R,
    user: &AuthenticatedUser,
    campaign_id: i32,
) -> ServiceResult<Campaign>
where
    R: CampaignReader + CampaignWriter + AuditLogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let before = repo
        .get_campaign_by_id(campaign_id)?
        .ok_or(ServiceError::NotFound)?;
    let activated = repo.set_active_campaign(campaign_id)?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Update,
            &user.email,
            "campaign",
            campaign_id.to_string(),
        )
        .snapshots(
            serde_json::to_value(&before).ok(),
            serde_json::to_value(&activated).ok(),
        ),
    )?;

    Ok(activated)
}
