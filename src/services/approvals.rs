//! IT validation and MCZ approval/rejection.

use log::error;
use validator::Validate;

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::domain::status::WorkflowStatus;
use crate::dto::approvals::{BatchError, BatchOutcome};
use crate::dto::prestataires::PrestataireRow;
use crate::forms::approvals::{ApproveBatchForm, RejectBatchForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuditLogWriter, PrestataireReader, PrestataireWriter};
use crate::services::prestataires::{ensure_in_scope, first_validation_message};
use crate::services::{ensure_any_role, ServiceError, ServiceResult};
use crate::{SERVICE_ADMIN_ROLE, SERVICE_IT_ROLE, SERVICE_MCZ_ROLE};

/// Marks a registered prestataire as validated by IT.
pub fn validate_prestataire<R>(
    repo: &R,
    user: &AuthenticatedUser,
    id: i32,
) -> ServiceResult<PrestataireRow>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_IT_ROLE, SERVICE_ADMIN_ROLE])?;

    let prestataire = repo.get_prestataire_by_id(id)?.ok_or(ServiceError::NotFound)?;

    if !prestataire
        .status
        .can_transition(WorkflowStatus::ValideParIt)
    {
        return Err(ServiceError::Validation(format!(
            "Le prestataire {} ne peut pas être validé depuis l'état {}",
            prestataire.prestataire_id, prestataire.status
        )));
    }

    let updated = repo.set_workflow_status(id, WorkflowStatus::ValideParIt, None)?;

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Validate,
            &user.email,
            "prestataire",
            updated.prestataire_id.clone(),
        )
        .snapshots(
            serde_json::to_value(&prestataire).ok(),
            serde_json::to_value(&updated).ok(),
        ),
    )?;

    Ok(updated.into())
}

/// Approves a batch of prestataires in the MCZ's zone.
pub fn approve_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ApproveBatchForm,
) -> ServiceResult<BatchOutcome>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_MCZ_ROLE, SERVICE_ADMIN_ROLE])?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    transition_batch(
        repo,
        user,
        &form.ids,
        WorkflowStatus::ApprouveParMcz,
        form.comment.as_deref(),
        AuditAction::Approve,
    )
}

/// Rejects a batch of prestataires; the comment is mandatory.
pub fn reject_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: RejectBatchForm,
) -> ServiceResult<BatchOutcome>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_MCZ_ROLE, SERVICE_ADMIN_ROLE])?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    transition_batch(
        repo,
        user,
        &form.ids,
        WorkflowStatus::RejeteParMcz,
        Some(form.comment.as_str()),
        AuditAction::Reject,
    )
}

fn transition_batch<R>(
    repo: &R,
    user: &AuthenticatedUser,
    ids: &[i32],
    target: WorkflowStatus,
    comment: Option<&str>,
    action: AuditAction,
) -> ServiceResult<BatchOutcome>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    let mut outcome = BatchOutcome::new();

    for &id in ids {
        let prestataire = match repo.get_prestataire_by_id(id)? {
            Some(p) => p,
            None => {
                outcome.errors.push(BatchError {
                    id,
                    reason: "Prestataire introuvable".to_string(),
                });
                continue;
            }
        };

        if ensure_in_scope(user, &prestataire).is_err() {
            outcome.errors.push(BatchError {
                id,
                reason: "Hors de votre zone de santé".to_string(),
            });
            continue;
        }

        if !prestataire.status.can_transition(target) {
            outcome.errors.push(BatchError {
                id,
                reason: format!("Transition impossible depuis l'état {}", prestataire.status),
            });
            continue;
        }

        match repo.set_workflow_status(id, target, comment) {
            Ok(updated) => {
                repo.append_audit_log(
                    &NewAuditLog::new(
                        action.clone(),
                        &user.email,
                        "prestataire",
                        updated.prestataire_id.clone(),
                    )
                    .snapshots(
                        serde_json::to_value(&prestataire).ok(),
                        serde_json::to_value(&updated).ok(),
                    ),
                )?;
                outcome.updated.push(id);
            }
            Err(err) => {
                error!("Failed to transition prestataire {id}: {err}");
                outcome.errors.push(BatchError {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(outcome)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::test_support::{prestataire_fixture, prestataire_with_status, user_with_role};
    use mockall::predicate::eq;

    #[test]
    fn validate_requires_it_role() {
        let mut repo = MockRepository::new();
        repo.expect_set_workflow_status().times(0);
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(1), None);

        let result = validate_prestataire(&repo, &user, 1);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn approve_refuses_already_rejected_prestataire() {
        let mut repo = MockRepository::new();
        repo.expect_get_prestataire_by_id()
            .with(eq(1))
            .returning(|_| {
                Ok(Some(prestataire_with_status(
                    1,
                    Some(7),
                    WorkflowStatus::RejeteParMcz,
                )))
            });
        repo.expect_set_workflow_status().times(0);
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        let outcome = approve_batch(
            &repo,
            &user,
            ApproveBatchForm {
                ids: vec![1],
                comment: None,
            },
        )
        .unwrap();

        assert!(outcome.updated.is_empty());
        assert_eq!(outcome.errors.len(), 1);
    }

    #[test]
    fn approve_skips_out_of_zone_rows_and_processes_the_rest() {
        let mut repo = MockRepository::new();
        repo.expect_get_prestataire_by_id()
            .with(eq(1))
            .returning(|_| {
                Ok(Some(prestataire_with_status(
                    1,
                    Some(3),
                    WorkflowStatus::ValideParIt,
                )))
            });
        repo.expect_get_prestataire_by_id()
            .with(eq(2))
            .returning(|_| {
                Ok(Some(prestataire_with_status(
                    2,
                    Some(7),
                    WorkflowStatus::ValideParIt,
                )))
            });
        repo.expect_set_workflow_status()
            .with(eq(2), eq(WorkflowStatus::ApprouveParMcz), eq(None::<&str>))
            .times(1)
            .returning(|id, status, _| {
                let mut p = prestataire_fixture(id, Some(7));
                p.status = status;
                Ok(p)
            });
        repo.expect_append_audit_log()
            .times(1)
            .returning(|entry| Ok(crate::test_support::audit_log_fixture(entry)));
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        let outcome = approve_batch(
            &repo,
            &user,
            ApproveBatchForm {
                ids: vec![1, 2],
                comment: None,
            },
        )
        .unwrap();

        assert_eq!(outcome.updated, vec![2]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].id, 1);
    }

    #[test]
    fn reject_passes_the_comment_through() {
        let mut repo = MockRepository::new();
        repo.expect_get_prestataire_by_id()
            .with(eq(1))
            .returning(|_| {
                Ok(Some(prestataire_with_status(
                    1,
                    Some(7),
                    WorkflowStatus::ValideParIt,
                )))
            });
        repo.expect_set_workflow_status()
            .with(
                eq(1),
                eq(WorkflowStatus::RejeteParMcz),
                eq(Some("Dossier incomplet")),
            )
            .times(1)
            .returning(|id, status, _| {
                let mut p = prestataire_fixture(id, Some(7));
                p.status = status;
                Ok(p)
            });
        repo.expect_append_audit_log()
            .times(1)
            .returning(|entry| Ok(crate::test_support::audit_log_fixture(entry)));
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        let outcome = reject_batch(
            &repo,
            &user,
            RejectBatchForm {
                ids: vec![1],
                comment: "Dossier incomplet".to_string(),
            },
        )
        .unwrap();

        assert_eq!(outcome.updated, vec![1]);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn reject_requires_comment() {
        let repo = MockRepository::new();
        let user = user_with_role(SERVICE_MCZ_ROLE, Some(7), None);

        let result = reject_batch(
            &repo,
            &user,
            RejectBatchForm {
                ids: vec![1],
                comment: String::new(),
            },
        );

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
