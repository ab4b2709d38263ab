//! Workflow status vocabulary and the shared status derivation.
//!
//! Historical exports mix camelCase English fields (`approvalStatus`) with
//! legacy French enum tokens (`APPROUVE_PAR_MCZ`), so every consumer used to
//! re-derive the effective status on its own. [`derive_effective_status`] is
//! the single place where that precedence lives now.

use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Uppercases a status token and folds accents and separators so that
/// `"Approuvé par MCZ"` and `"APPROUVE_PAR_MCZ"` compare equal.
pub fn normalize_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_sep = true;
    for c in raw.trim().chars() {
        let folded = match c {
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'à' | 'â' | 'ä' | 'À' | 'Â' | 'Ä' => 'A',
            'î' | 'ï' | 'Î' | 'Ï' => 'I',
            'ô' | 'ö' | 'Ô' | 'Ö' => 'O',
            'ù' | 'û' | 'ü' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' | 'Ç' => 'C',
            c if c.is_alphanumeric() => c.to_ascii_uppercase(),
            _ => {
                if !last_sep {
                    out.push('_');
                }
                last_sep = true;
                continue;
            }
        };
        out.push(folded);
        last_sep = false;
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Registration workflow state of a prestataire.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum WorkflowStatus {
    #[default]
    Enregistre,
    ValideParIt,
    EnAttenteParMcz,
    ApprouveParMcz,
    RejeteParMcz,
}

impl WorkflowStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "ENREGISTRE" => Some(Self::Enregistre),
            "VALIDE_PAR_IT" => Some(Self::ValideParIt),
            "EN_ATTENTE_PAR_MCZ" => Some(Self::EnAttenteParMcz),
            "APPROUVE_PAR_MCZ" => Some(Self::ApprouveParMcz),
            "REJETE_PAR_MCZ" => Some(Self::RejeteParMcz),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enregistre => "ENREGISTRE",
            Self::ValideParIt => "VALIDE_PAR_IT",
            Self::EnAttenteParMcz => "EN_ATTENTE_PAR_MCZ",
            Self::ApprouveParMcz => "APPROUVE_PAR_MCZ",
            Self::RejeteParMcz => "REJETE_PAR_MCZ",
        }
    }

    /// Whether the workflow allows moving from `self` to `to`.
    ///
    /// Approval and rejection are terminal, so a second approve/reject call
    /// on the same record is refused instead of silently overwriting.
    pub fn can_transition(self, to: Self) -> bool {
        use WorkflowStatus::*;
        matches!(
            (self, to),
            (Enregistre, ValideParIt)
                | (ValideParIt, EnAttenteParMcz)
                | (ValideParIt, ApprouveParMcz)
                | (ValideParIt, RejeteParMcz)
                | (EnAttenteParMcz, ApprouveParMcz)
                | (EnAttenteParMcz, RejeteParMcz)
        )
    }
}

impl Display for WorkflowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state fed by the partner payment report.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "UNPAID",
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Failed => "FAILED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "UNPAID" | "NON_PAYE" => Some(Self::Unpaid),
            "PENDING" | "EN_ATTENTE" | "EN_COURS" => Some(Self::Pending),
            "PAID" | "PAYE" => Some(Self::Paid),
            "FAILED" | "FAILURE" | "ECHEC" | "ECHOUE" => Some(Self::Failed),
            _ => None,
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// KYC verification state fed by the partner KYC report.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum KycStatus {
    #[default]
    NotSubmitted,
    Pending,
    Verified,
    Rejected,
}

impl KycStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSubmitted => "NOT_SUBMITTED",
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "NOT_SUBMITTED" | "NON_SOUMIS" => Some(Self::NotSubmitted),
            "PENDING" | "EN_ATTENTE" | "EN_COURS" | "SOUMIS" | "SUBMITTED" => Some(Self::Pending),
            "VERIFIED" | "VERIFIE" | "VALIDE" => Some(Self::Verified),
            "REJECTED" | "REJETE" | "REFUSE" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl Display for KycStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status fields as they may appear on a persisted or imported record,
/// with all their historical spellings.
#[derive(Clone, Debug, Default)]
pub struct RawStatuses<'a> {
    pub approval_status: Option<&'a str>,
    pub status: Option<&'a str>,
    pub validation_status: Option<&'a str>,
    pub validated_at: Option<NaiveDateTime>,
}

/// Effective status shown on every dashboard.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum EffectiveStatus {
    Approved,
    Rejected,
    ValidatedByIt,
    Pending,
}

impl EffectiveStatus {
    /// French badge label rendered by the dashboards.
    pub const fn badge(self) -> &'static str {
        match self {
            Self::Approved => "Approuvé",
            Self::Rejected => "Rejeté",
            Self::ValidatedByIt => "Validé par IT",
            Self::Pending => "En attente",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::ValidatedByIt => "VALIDATED_BY_IT",
            Self::Pending => "PENDING",
        }
    }
}

/// Derives the effective status from whichever fields the record carries.
///
/// Precedence: approved, then rejected, then validated-by-IT, then pending.
pub fn derive_effective_status(raw: &RawStatuses) -> EffectiveStatus {
    let approval = raw.approval_status.map(normalize_token);
    let status = raw.status.map(normalize_token);
    let validation = raw.validation_status.map(normalize_token);

    let approval = approval.as_deref();
    let status = status.as_deref();
    let validation = validation.as_deref();

    if approval == Some("APPROVED") || status == Some("APPROUVE_PAR_MCZ") {
        return EffectiveStatus::Approved;
    }
    if approval == Some("REJECTED") || status == Some("REJETE_PAR_MCZ") {
        return EffectiveStatus::Rejected;
    }
    if raw.validated_at.is_some()
        || matches!(status, Some("VALIDE_PAR_IT") | Some("EN_ATTENTE_PAR_MCZ"))
        || matches!(validation, Some("VALIDATED") | Some("VALIDE") | Some("VALIDE_PAR_IT"))
    {
        return EffectiveStatus::ValidatedByIt;
    }
    EffectiveStatus::Pending
}
