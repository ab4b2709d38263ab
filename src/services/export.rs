//! CSV and XLSX export of the filtered prestataire list.

use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook};

use crate::domain::prestataire::Prestataire;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{PrestataireListQuery, PrestataireReader};
use crate::services::prestataires::{scope_query, ALL_ROLES};
use crate::services::{ensure_any_role, ServiceError, ServiceResult};

pub const EXPORT_CSV: &str = "csv";
pub const EXPORT_XLSX: &str = "xlsx";

const EXPORT_HEADERS: &[&str] = &[
    "Prestataire ID",
    "Nom",
    "Prénom",
    "Catégorie",
    "Téléphone",
    "Jours de présence",
    "Statut",
    "Statut KYC",
    "Statut de paiement",
    "Montant",
    "Devise",
    "Date de paiement",
];

/// A file ready to stream back to the client.
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

fn export_cells(p: &Prestataire) -> Vec<String> {
    vec![
        p.prestataire_id.clone(),
        p.last_name.clone(),
        p.first_name.clone(),
        p.category.clone(),
        p.phone.clone().unwrap_or_default(),
        p.presence_days.to_string(),
        p.effective_status().badge().to_string(),
        p.kyc_status.as_str().to_string(),
        p.payment_status.as_str().to_string(),
        p.payment_amount.map(|a| format!("{a:.2}")).unwrap_or_default(),
        p.payment_currency.clone().unwrap_or_default(),
        p.payment_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    ]
}

fn to_csv(prestataires: &[Prestataire]) -> ServiceResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| ServiceError::Export(e.to_string()))?;
    for prestataire in prestataires {
        writer
            .write_record(export_cells(prestataire))
            .map_err(|e| ServiceError::Export(e.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ServiceError::Export(e.to_string()))
}

fn to_xlsx(prestataires: &[Prestataire]) -> ServiceResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let bold = Format::new().set_bold();

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        sheet
            .write_with_format(0, col as u16, *header, &bold)
            .map_err(|e| ServiceError::Export(e.to_string()))?;
    }
    for (row, prestataire) in prestataires.iter().enumerate() {
        for (col, cell) in export_cells(prestataire).into_iter().enumerate() {
            sheet
                .write(row as u32 + 1, col as u16, cell)
                .map_err(|e| ServiceError::Export(e.to_string()))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServiceError::Export(e.to_string()))
}

/// Exports the user's visible selection in the requested format.
pub fn export_prestataires<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: PrestataireListQuery,
    format: &str,
) -> ServiceResult<ExportFile>
where
    R: PrestataireReader + ?Sized,
{
    ensure_any_role(user, ALL_ROLES)?;

    let query = scope_query(user, query);
    let (_, prestataires) = repo.list_prestataires(query)?;

    let stamp = Utc::now().format("%Y%m%d");
    match format {
        EXPORT_CSV => Ok(ExportFile {
            filename: format!("prestataires-{stamp}.csv"),
            content_type: "text/csv; charset=utf-8",
            bytes: to_csv(&prestataires)?,
        }),
        EXPORT_XLSX => Ok(ExportFile {
            filename: format!("prestataires-{stamp}.xlsx"),
            content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            bytes: to_xlsx(&prestataires)?,
        }),
        other => Err(ServiceError::Validation(format!(
            "Format d'export inconnu: {other}"
        ))),
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;
    use crate::test_support::{prestataire_fixture, user_with_role};

    #[test]
    fn csv_export_has_header_and_one_row_per_prestataire() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires()
            .returning(|_| Ok((1, vec![prestataire_fixture(1, Some(7))])));
        let user = user_with_role("partner", None, None);

        let file =
            export_prestataires(&repo, &user, PrestataireListQuery::new(), EXPORT_CSV).unwrap();

        let body = String::from_utf8(file.bytes).unwrap();
        assert_eq!(body.lines().count(), 2);
        assert!(body.starts_with("Prestataire ID,"));
        assert!(file.filename.ends_with(".csv"));
    }

    #[test]
    fn xlsx_export_is_a_zip_container() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires()
            .returning(|_| Ok((1, vec![prestataire_fixture(1, Some(7))])));
        let user = user_with_role("partner", None, None);

        let file =
            export_prestataires(&repo, &user, PrestataireListQuery::new(), EXPORT_XLSX).unwrap();

        assert!(file.bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_list_prestataires()
            .returning(|_| Ok((0, vec![])));
        let user = user_with_role("partner", None, None);

        let result = export_prestataires(&repo, &user, PrestataireListQuery::new(), "pdf");

        assert!(matches!(result, Err(ServiceError::Validation(_))));
    }
}
