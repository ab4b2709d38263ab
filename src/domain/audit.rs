use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Append-only trail entry recording who changed what.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuditLog {
    pub id: i32,
    pub action: AuditAction,
    pub actor: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    Validate,
    Sync,
    Other(String),
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAuditLog {
    pub action: AuditAction,
    pub actor: String,
    pub entity_type: String,
    pub entity_id: String,
    pub before: Option<Value>,
    pub after: Option<Value>,
}

impl NewAuditLog {
    pub fn new(
        action: AuditAction,
        actor: impl Into<String>,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        Self {
            action,
            actor: actor.into(),
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            before: None,
            after: None,
        }
    }

    pub fn snapshots(mut self, before: Option<Value>, after: Option<Value>) -> Self {
        self.before = before;
        self.after = after;
        self
    }
}

impl Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditAction::Create => write!(f, "CREATE"),
            AuditAction::Update => write!(f, "UPDATE"),
            AuditAction::Delete => write!(f, "DELETE"),
            AuditAction::Approve => write!(f, "APPROVE"),
            AuditAction::Reject => write!(f, "REJECT"),
            AuditAction::Validate => write!(f, "VALIDATE"),
            AuditAction::Sync => write!(f, "SYNC"),
            AuditAction::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for AuditAction {
    fn from(s: &str) -> Self {
        match s {
            "CREATE" => AuditAction::Create,
            "UPDATE" => AuditAction::Update,
            "DELETE" => AuditAction::Delete,
            "APPROVE" => AuditAction::Approve,
            "REJECT" => AuditAction::Reject,
            "VALIDATE" => AuditAction::Validate,
            "SYNC" => AuditAction::Sync,
            _ => AuditAction::Other(s.to_string()),
        }
    }
}

impl From<String> for AuditAction {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}
