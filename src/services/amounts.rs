//! Batch payment-amount calculation from per-role rate rules.

use std::collections::BTreeSet;

use validator::Validate;

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::domain::rates::{compute_amount, match_rule};
use crate::dto::amounts::AmountSummary;
use crate::forms::amounts::AmountRequestForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuditLogWriter, PrestataireReader, PrestataireWriter};
use crate::services::prestataires::first_validation_message;
use crate::services::{ensure_any_role, ServiceError, ServiceResult};
use crate::{SERVICE_ADMIN_ROLE, SERVICE_PARTNER_ROLE};

/// Computes `presence_days x rate` for every prestataire in the selection
/// whose category matches a rule, and stores the resulting amount.
/// Categories no rule matches are collected instead of failing the batch.
pub fn compute_payment_amounts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AmountRequestForm,
) -> ServiceResult<AmountSummary>
where
    R: PrestataireReader + PrestataireWriter + AuditLogWriter + ?Sized,
{
    ensure_any_role(user, &[SERVICE_PARTNER_ROLE, SERVICE_ADMIN_ROLE])?;

    form.validate()
        .map_err(|err| ServiceError::Validation(first_validation_message(&err)))?;

    let (_, prestataires) = repo.list_prestataires(form.to_query())?;

    let mut updated = 0;
    let mut unmatched = BTreeSet::new();

    for prestataire in &prestataires {
        match match_rule(&form.rules, &prestataire.category) {
            Some(rule) => {
                let computed = compute_amount(rule, prestataire.presence_days);
                repo.set_payment_amount(prestataire.id, computed.amount, &computed.currency)?;
                updated += 1;
            }
            None => {
                unmatched.insert(prestataire.category.clone());
            }
        }
    }

    let summary = AmountSummary {
        updated,
        unmatched_categories: unmatched.into_iter().collect(),
    };

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Update,
            &user.email,
            "payment_amounts",
            format!("{updated} prestataires"),
        )
        .snapshots(None, serde_json::to_value(&summary).ok()),
    )?;

    Ok(summary)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::rates::RateRule;
    use crate::repository::mock::MockRepository;
    use crate::test_support::{audit_log_fixture, prestataire_fixture, user_with_role};

    fn rules() -> Vec<RateRule> {
        vec![RateRule {
            role: "Infirmier Titulaire".to_string(),
            rate: 5.0,
            currency: "USD".to_string(),
        }]
    }

    #[test]
    fn amounts_are_days_times_rate() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires().returning(|_| {
            let mut p = prestataire_fixture(1, Some(7));
            p.category = "Infirmier Titulaire".to_string();
            p.presence_days = 10;
            Ok((1, vec![p]))
        });
        repo.expect_set_payment_amount()
            .withf(|_, amount, currency| (*amount - 50.0).abs() < f64::EPSILON && currency == "USD")
            .times(1)
            .returning(|id, _, _| Ok(prestataire_fixture(id, Some(7))));
        repo.expect_append_audit_log()
            .returning(|entry| Ok(audit_log_fixture(entry)));
        let user = user_with_role("partner", None, None);

        let summary = compute_payment_amounts(
            &repo,
            &user,
            AmountRequestForm {
                rules: rules(),
                campaign_id: None,
                form_id: None,
                province_id: None,
                zone_id: None,
                aire_id: None,
                category: None,
            },
        )
        .unwrap();

        assert_eq!(summary.updated, 1);
        assert!(summary.unmatched_categories.is_empty());
    }

    #[test]
    fn unmatched_categories_are_collected() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires().returning(|_| {
            let mut p = prestataire_fixture(1, Some(7));
            p.category = "Relais Communautaire".to_string();
            Ok((1, vec![p]))
        });
        repo.expect_set_payment_amount().times(0);
        repo.expect_append_audit_log()
            .returning(|entry| Ok(audit_log_fixture(entry)));
        let user = user_with_role("partner", None, None);

        let summary = compute_payment_amounts(
            &repo,
            &user,
            AmountRequestForm {
                rules: rules(),
                campaign_id: None,
                form_id: None,
                province_id: None,
                zone_id: None,
                aire_id: None,
                category: None,
            },
        )
        .unwrap();

        assert_eq!(summary.updated, 0);
        assert_eq!(summary.unmatched_categories, vec!["Relais Communautaire"]);
    }
}
