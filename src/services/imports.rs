//! Payment and KYC report ingestion.
//!
//! Reports arrive as CSV or XLSX exports from the payment operator. Parsing
//! is tolerant per row: a bad row is skipped and reported, never fatal.

use log::{info, warn};

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::dto::imports::{ImportRowError, ImportSummary};
use crate::models::auth::AuthenticatedUser;
use crate::reports::kyc::parse_kyc_report;
use crate::reports::payment::parse_payment_report;
use crate::reports::Sheet;
use crate::repository::{AuditLogWriter, PrestataireReader, PrestataireWriter};
use crate::services::{ensure_any_role, ServiceResult};
use crate::{SERVICE_ADMIN_ROLE, SERVICE_PARTNER_ROLE};

/// Parses an uploaded payment report and applies each row to the matching
/// prestataire. Empty columns in the report never erase stored values.
pub fn import_payment_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filename: Option<&str>,
    bytes: &[u8],
) -> ServiceResult<ImportSummary>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_PARTNER_ROLE, SERVICE_ADMIN_ROLE])?;

    let sheet = Sheet::from_bytes(filename, bytes)?;
    let report = parse_payment_report(&sheet)?;

    let mut summary = ImportSummary {
        updated: 0,
        skipped: report.skipped,
        errors: Vec::new(),
    };

    for update in &report.rows {
        let current = match repo.get_prestataire_by_code(&update.prestataire_id)? {
            Some(p) => p,
            None => {
                warn!("Payment report row for unknown prestataire {}", update.prestataire_id);
                summary.errors.push(ImportRowError {
                    prestataire_id: update.prestataire_id.clone(),
                    reason: "Prestataire inconnu".to_string(),
                });
                continue;
            }
        };
        repo.apply_payment_update(current.id, update)?;
        summary.updated += 1;
    }

    info!(
        "Payment report imported by {}: {} updated, {} skipped, {} unmatched",
        user.email,
        summary.updated,
        summary.skipped.len(),
        summary.errors.len()
    );

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Sync,
            &user.email,
            "payment_report",
            filename.unwrap_or("rapport").to_string(),
        )
        .snapshots(None, serde_json::to_value(&summary).ok()),
    )?;

    Ok(summary)
}

/// Parses an uploaded KYC report and applies each row, same contract as the
/// payment import.
pub fn import_kyc_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    filename: Option<&str>,
    bytes: &[u8],
) -> ServiceResult<ImportSummary>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_PARTNER_ROLE, SERVICE_ADMIN_ROLE])?;

    let sheet = Sheet::from_bytes(filename, bytes)?;
    let report = parse_kyc_report(&sheet)?;

    let mut summary = ImportSummary {
        updated: 0,
        skipped: report.skipped,
        errors: Vec::new(),
    };

    for update in &report.rows {
        let current = match repo.get_prestataire_by_code(&update.prestataire_id)? {
            Some(p) => p,
            None => {
                warn!("KYC report row for unknown prestataire {}", update.prestataire_id);
                summary.errors.push(ImportRowError {
                    prestataire_id: update.prestataire_id.clone(),
                    reason: "Prestataire inconnu".to_string(),
                });
                continue;
            }
        };
        repo.apply_kyc_update(current.id, update)?;
        summary.updated += 1;
    }

    info!(
        "KYC report imported by {}: {} updated, {} skipped, {} unmatched",
        user.email,
        summary.updated,
        summary.skipped.len(),
        summary.errors.len()
    );

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Sync,
            &user.email,
            "kyc_report",
            filename.unwrap_or("rapport").to_string(),
        )
        .snapshots(None, serde_json::to_value(&summary).ok()),
    )?;

    Ok(summary)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::test_support::{audit_log_fixture, prestataire_fixture, user_with_role};

    const PAYMENT_CSV: &[u8] =
        b"Prestataire ID,Statut de paiement,Montant\nP001,PAYE,125.50\nP404,PAYE,80\n";

    #[test]
    fn import_requires_partner_role() {
        let repo = MockRepository::new();
        let user = user_with_role("mcz", Some(1), None);

        let result = import_payment_report(&repo, &user, Some("report.csv"), PAYMENT_CSV);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn unknown_prestataire_rows_are_reported_not_fatal() {
        let mut repo = MockRepository::new();
        repo.expect_get_prestataire_by_code()
            .returning(|code| {
                if code == "P001" {
                    Ok(Some(prestataire_fixture(1, Some(7))))
                } else {
                    Ok(None)
                }
            });
        repo.expect_apply_payment_update()
            .times(1)
            .returning(|id, _| Ok(prestataire_fixture(id, Some(7))));
        repo.expect_append_audit_log()
            .times(1)
            .returning(|entry| Ok(audit_log_fixture(entry)));
        let user = user_with_role("partner", None, None);

        let summary =
            import_payment_report(&repo, &user, Some("report.csv"), PAYMENT_CSV).unwrap();

        assert_eq!(summary.updated, 1);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].prestataire_id, "P404");
    }

    #[test]
    fn missing_status_column_is_a_report_error() {
        let mut repo = MockRepository::new();
        repo.expect_apply_payment_update().times(0);
        let user = user_with_role("partner", None, None);

        let result = import_payment_report(
            &repo,
            &user,
            Some("report.csv"),
            b"Prestataire ID,Montant\nP001,10\n",
        );

        assert!(matches!(result, Err(ServiceError::Report(_))));
    }
}
