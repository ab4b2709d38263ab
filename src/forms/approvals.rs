use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ApproveBatchForm {
    #[validate(length(min = 1, message = "Aucun prestataire sélectionné"))]
    pub ids: Vec<i32>,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectBatchForm {
    #[validate(length(min = 1, message = "Aucun prestataire sélectionné"))]
    pub ids: Vec<i32>,
    /// A rejection always carries a motivation for the prestataire.
    #[validate(length(min = 1, message = "Un commentaire est requis pour un rejet"))]
    pub comment: String,
}
