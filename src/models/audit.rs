use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::audit::{AuditLog as DomainAuditLog, NewAuditLog as DomainNewAuditLog};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::audit_logs)]
/// Diesel model for [`crate::domain::audit::AuditLog`]. Snapshots are stored
/// as JSON text.
pub struct AuditLog {
    pub id: i32,
    pub action: String,
    pub actor: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<String>,
    pub after: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::audit_logs)]
pub struct NewAuditLog {
    pub action: String,
    pub actor: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl From<AuditLog> for DomainAuditLog {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id,
            action: log.action.into(),
            actor: log.actor,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            before: log.before.and_then(|s| serde_json::from_str(&s).ok()),
            after: log.after.and_then(|s| serde_json::from_str(&s).ok()),
            created_at: log.created_at,
        }
    }
}

impl From<&DomainNewAuditLog> for NewAuditLog {
    fn from(log: &DomainNewAuditLog) -> Self {
        Self {
            action: log.action.to_string(),
            actor: log.actor.clone(),
            entity_type: log.entity_type.clone(),
            entity_id: log.entity_id.clone(),
            before: log.before.as_ref().map(|v| v.to_string()),
            after: log.after.as_ref().map(|v| v.to_string()),
        }
    }
}
