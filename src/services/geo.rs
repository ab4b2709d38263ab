//! Geographic reference data: provinces, health zones, health aires.

use log::info;

use crate::domain::audit::{AuditAction, NewAuditLog};
use crate::domain::geo::{Aire, GeoHierarchy, Province, Zone};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{AuditLogWriter, GeoReader, GeoWriter};
use crate::services::prestataires::ALL_ROLES;
use crate::services::{ensure_any_role, ensure_role, ServiceResult};
use crate::SERVICE_ADMIN_ROLE;

pub fn list_provinces<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Province>>
where
    R: GeoReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;
    Ok(repo.list_provinces()?)
}

pub fn list_zones<R>(
    repo: &R,
    user: &AuthenticatedUser,
    province_id: Option<i32>,
) -> ServiceResult<Vec<Zone>>
where
    R: GeoReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;
    Ok(repo.list_zones(province_id)?)
}

pub fn list_aires<R>(
    repo: &R,
    user: &AuthenticatedUser,
    zone_id: Option<i32>,
) -> ServiceResult<Vec<Aire>>
where
    R: GeoReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;
    Ok(repo.list_aires(zone_id)?)
}

/// Upserts the full province/zone/aire hierarchy, returning how many
/// reference rows were created. Matching is by name, existing rows stay.
pub fn sync_hierarchy<R>(
    repo: &R,
    user: &AuthenticatedUser,
    hierarchy: &GeoHierarchy,
) -> ServiceResult<usize>
where
    R: GeoWriter + AuditLogWriter + ?Sized,
{
    ensure_role(user, SERVICE_ADMIN_ROLE)?;

    let created = repo.sync_hierarchy(hierarchy)?;
    info!("Geographic hierarchy synced by {}: {created} rows created", user.email);

    repo.append_audit_log(
        &NewAuditLog::new(
            AuditAction::Sync,
            &user.email,
            "geography",
            format!("{created} créés"),
        )
        .snapshots(None, serde_json::to_value(hierarchy).ok()),
    )?;

    Ok(created)
}
