use serde::Serialize;

use crate::domain::prestataire::Prestataire;

/// Prestataire as rendered by the dashboard tables: the raw record plus the
/// derived status so no page has to re-derive it.
#[derive(Debug, Serialize)]
pub struct PrestataireRow {
    #[serde(flatten)]
    pub prestataire: Prestataire,
    pub effective_status: &'static str,
    pub badge: &'static str,
}

impl From<Prestataire> for PrestataireRow {
    fn from(prestataire: Prestataire) -> Self {
        let effective = prestataire.effective_status();
        Self {
            prestataire,
            effective_status: effective.as_str(),
            badge: effective.badge(),
        }
    }
}
