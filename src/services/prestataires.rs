//! Prestataire listing and registration.

use validator::Validate;

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::domain::prestataire::Prestataire;
use crate::dto::prestataires::PrestataireRow;
use crate::forms::prestataires::{RegisterPrestataireForm, UpdatePrestataireForm};
use crate::models::auth::{check_role, AuthenticatedUser};
use crate::pagination::{Paginated, DEFAULT_ITEMS_PER_PAGE};
use crate::repository::{
    AuditLogWriter, CampaignReader, PrestataireListQuery, PrestataireReader, PrestataireWriter,
};
use crate::services::{ensure_any_role, ServiceError, ServiceResult};
use crate::{
    SERVICE_ADMIN_ROLE, SERVICE_DPS_ROLE, SERVICE_IT_ROLE, SERVICE_MCZ_ROLE, SERVICE_PARTNER_ROLE,
};

pub const ALL_ROLES: &[&str] = &[
    SERVICE_IT_ROLE,
    SERVICE_MCZ_ROLE,
    SERVICE_PARTNER_ROLE,
    SERVICE_DPS_ROLE,
    SERVICE_ADMIN_ROLE,
];

/// Narrows a list query to the user's geographic scope: an MCZ only sees
/// their health zone, a DPS their province. Partners and admins see all.
pub fn scope_query(user: &AuthenticatedUser, mut query: PrestataireListQuery) -> PrestataireListQuery {
    if check_role(SERVICE_MCZ_ROLE, &user.roles) {
        if let Some(zone_id) = user.zone_id {
            query.zone_id = Some(zone_id);
        }
    } else if check_role(SERVICE_DPS_ROLE, &user.roles) {
        if let Some(province_id) = user.province_id {
            query.province_id = Some(province_id);
        }
    }
    query
}

/// Loads the filtered, paginated prestataire list for the dashboards.
pub fn list_prestataires<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PrestataireListQuery,
    page: usize,
) -> ServiceResult<Paginated<PrestataireRow>>
where
    R: PrestataireReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;

    let query = scope_query(user, query).paginate(page, DEFAULT_ITEMS_PER_PAGE);
    let (total, prestataires) = repo.list_prestataires(query)?;

    let rows = prestataires.into_iter().map(PrestataireRow::from).collect();
    Ok(Paginated::new(rows, page, total, DEFAULT_ITEMS_PER_PAGE))
}

/// Fetches one prestataire, scoped like the list.
pub fn get_prestataire<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<PrestataireRow>
where
    R: PrestataireReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;

    let prestataire = repo.get_prestataire_by_id(id)?.ok_or(ServiceError::NotFound)?;
    ensure_in_scope(user, &prestataire)?;

    Ok(prestataire.into())
}

pub(crate) fn ensure_in_scope(
    user: &AuthenticatedUser,
    prestataire: &Prestataire,
) -> ServiceResult<()> {
    if check_role(SERVICE_MCZ_ROLE, &user.roles) {
        if let Some(zone_id) = user.zone_id {
            if prestataire.zone_id != Some(zone_id) {
                return Err(ServiceError::Unauthorized);
            }
        }
    }
    if check_role(SERVICE_DPS_ROLE, &user.roles) {
        if let Some(province_id) = user.province_id {
            if prestataire.province_id != Some(province_id) {
                return Err(ServiceError::Unauthorized);
            }
        }
    }
    Ok(())
}

/// Validates the registration form and creates the prestataire, defaulting
/// its form to the active campaign's enregistrement form.
pub fn register_prestataire<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RegisterPrestataireForm,
) -> ServiceResult<PrestataireRow>
where
    R: PrestataireReader + PrestataireWriter + CampaignReader + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_IT_ROLE, SERVICE_ADMIN_ROLE])?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    let default_form_id = repo.get_active_enregistrement_form()?.map(|f| f.id);
    let new_prestataire = form.into_new_prestataire(default_form_id);

    if repo
        .get_prestataire_by_code(&new_prestataire.prestataire_id)?
        .is_some()
    {
        return Err(ServiceError::Validation(format!(
            "Le prestataire {} existe déjà",
            new_prestataire.prestataire_id
        )));
    }

    repo.create_prestataires(std::slice::from_ref(&new_prestataire))?;
    let created = repo
        .get_prestataire_by_code(&new_prestataire.prestataire_id)?
        .ok_or(ServiceError::NotFound)?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Create,
            &user.email,
            "prestataire",
            created.prestataire_id.clone(),
        )
        .snapshots(None, serde_json::to_value(&created).ok()),
    )?;

    Ok(created.into())
}

/// Applies registration-field edits and records the before/after snapshots.
pub fn update_prestataire<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
    form: UpdatePrestataireForm,
) -> ServiceResult<PrestataireRow>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_IT_ROLE, SERVICE_ADMIN_ROLE])?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    let before = repo.get_prestataire_by_id(id)?.ok_or(ServiceError::NotFound)?;
    let updated = repo.update_prestataire(id, &form.into())?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Update,
            &user.email,
            "prestataire",
            updated.prestataire_id.clone(),
        )
        .snapshots(
            serde_json::to_value(&before).ok(),
            serde_json::to_value(&updated).ok(),
        ),
    )?;

    Ok(updated.into())
}

pub(crate) fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_values()
        .flatten()
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| "Formulaire invalide".to_string())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::test_support::{prestataire_fixture, user_with_role};

    #[test]
    fn list_requires_a_known_role() {
        let repo = MockRepository::new();
        let user = user_with_role("accountant", None, None);

        let result = list_prestataires(&repo, &user, PrestataireListQuery::new(), 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn mcz_list_is_scoped_to_their_zone() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires()
            .withf(|query| query.zone_id == Some(7))
            .times(1)
            .returning(|_| Ok((0, vec![])));
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        list_prestataires(&repo, &user, PrestataireListQuery::new().zone(999), 1).unwrap();
    }

    #[test]
    fn get_refuses_out_of_zone_prestataire() {
        let mut repo = MockRepository::new();
        repo.expect_get_prestataire_by_id()
            .returning(|_| Ok(Some(prestataire_fixture(1, Some(3)))));
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        let result = get_prestataire(&repo, &user, 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
