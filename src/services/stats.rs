//! Dashboard counters.

use std::collections::BTreeMap;

use crate::domain::prestataire::Prestataire;
use crate::domain::status::{EffectiveStatus, KycStatus, PaymentStatus};
use crate::dto::stats::{StatsSummary, StatusBreakdown, ZoneSummary};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{PrestataireListQuery, PrestataireReader};
use crate::services::prestataires::{scope_query, ALL_ROLES};
use crate::services::{ensure_any_role, ServiceResult};

fn tally(breakdown: &mut StatusBreakdown, prestataire: &Prestataire) {
    breakdown.total += 1;
    match prestataire.effective_status() {
        EffectiveStatus::Approved => breakdown.approved += 1,
        EffectiveStatus::Rejected => breakdown.rejected += 1,
        EffectiveStatus::ValidatedByIt => breakdown.validated += 1,
        EffectiveStatus::Pending => breakdown.pending += 1,
    }
    if prestataire.payment_status == PaymentStatus::Paid {
        breakdown.paid += 1;
    }
    if prestataire.kyc_status == KycStatus::Verified {
        breakdown.kyc_verified += 1;
    }
}

/// Status counters over the user's visible selection, overall and per zone.
pub fn stats_summary<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PrestataireListQuery,
) -> ServiceResult<StatsSummary>
where
    R: PrestataireReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;

    let query = scope_query(user, query);
    let (_, prestataires) = repo.list_prestataires(query)?;

    let mut overall = StatusBreakdown::default();
    let mut per_zone: BTreeMap<Option<i32>, StatusBreakdown> = BTreeMap::new();

    for prestataire in &prestataires {
        tally(&mut overall, prestataire);
        tally(per_zone.entry(prestataire.zone_id).or_default(), prestataire);
    }

    let zones = per_zone
        .into_iter()
        .map(|(zone_id, breakdown)| ZoneSummary { zone_id, breakdown })
        .collect();

    Ok(StatsSummary { overall, zones })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::status::WorkflowStatus;
    use crate::repository::mock::MockRepository;
    use crate::test_support::{prestataire_with_status, user_with_role};

    #[test]
    fn counters_split_by_zone_and_effective_status() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires().returning(|_| {
            let mut paid = prestataire_with_status(1, Some(1), WorkflowStatus::ApprouveParMcz);
            paid.payment_status = PaymentStatus::Paid;
            let validated = prestataire_with_status(2, Some(1), WorkflowStatus::ValideParIt);
            let pending = prestataire_with_status(3, Some(2), WorkflowStatus::Enregistre);
            Ok((3, vec![paid, validated, pending]))
        });
        let user = user_with_role("admin", None, None);

        let summary = stats_summary(&repo, &user, PrestataireListQuery::new()).unwrap();

        assert_eq!(summary.overall.total, 3);
        assert_eq!(summary.overall.approved, 1);
        assert_eq!(summary.overall.validated, 1);
        assert_eq!(summary.overall.pending, 1);
        assert_eq!(summary.overall.paid, 1);
        assert_eq!(summary.zones.len(), 2);
        assert_eq!(summary.zones[0].zone_id, Some(1));
        assert_eq!(summary.zones[0].breakdown.total, 2);
    }

    #[test]
    fn legacy_approval_status_counts_as_approved() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires().returning(|_| {
            let mut p = prestataire_with_status(1, Some(1), WorkflowStatus::Enregistre);
            p.approval_status = Some("APPROVED".to_string());
            Ok((1, vec![p]))
        });
        let user = user_with_role("admin", None, None);

        let summary = stats_summary(&repo, &user, PrestataireListQuery::new()).unwrap();

        assert_eq!(summary.overall.approved, 1);
        assert_eq!(summary.overall.pending, 0);
    }
}
