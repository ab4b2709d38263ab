//! KYC report parsing.

use log::warn;

use crate::domain::prestataire::KycUpdate;
use crate::domain::status::KycStatus;
use crate::reports::{parse_report_date, ParsedReport, ReportError, Sheet, SkippedRow};

const ID_SYNONYMS: &[&str] = &[
    "prestataire id",
    "id du prestataire",
    "id prestataire",
    "identifiant",
    "code prestataire",
    "matricule",
    "code",
];
const STATUS_SYNONYMS: &[&str] = &[
    "statut kyc",
    "kyc status",
    "statut de verification",
    "verification status",
    "statut",
    "status",
];
const ACCOUNT_NUMBER_SYNONYMS: &[&str] = &[
    "numero de compte",
    "account number",
    "numero mobile money",
    "msisdn",
    "compte",
    "telephone",
];
const ACCOUNT_NAME_SYNONYMS: &[&str] = &[
    "nom du beneficiaire",
    "beneficiary name",
    "nom du compte",
    "account name",
    "titulaire",
];
const OPERATOR_SYNONYMS: &[&str] = &["operateur", "operator", "provider", "fournisseur"];
const VERIFIED_DATE_SYNONYMS: &[&str] = &[
    "date de verification",
    "verification date",
    "date kyc",
    "date",
];

/// Parses a KYC report sheet into normalized updates, skipping rows with a
/// missing id or an unknown verification status.
pub fn parse_kyc_report(sheet: &Sheet) -> Result<ParsedReport<KycUpdate>, ReportError> {
    let id_col = sheet
        .locate_column(ID_SYNONYMS)
        .ok_or(ReportError::MissingColumn("identifiant du prestataire"))?;
    let status_col = sheet
        .locate_column(STATUS_SYNONYMS)
        .ok_or(ReportError::MissingColumn("statut KYC"))?;
    let account_number_col = sheet.locate_column(ACCOUNT_NUMBER_SYNONYMS);
    let account_name_col = sheet.locate_column(ACCOUNT_NAME_SYNONYMS);
    let operator_col = sheet.locate_column(OPERATOR_SYNONYMS);
    let verified_date_col = sheet.locate_column(VERIFIED_DATE_SYNONYMS);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in sheet.rows.iter().enumerate() {
        let line = index + 2;

        let Some(prestataire_id) = sheet.cell(row, Some(id_col)) else {
            skipped.push(SkippedRow {
                line,
                reason: "identifiant du prestataire manquant".to_string(),
            });
            continue;
        };

        let raw_status = sheet.cell(row, Some(status_col)).unwrap_or("");
        let Some(status) = KycStatus::parse(raw_status) else {
            warn!("KYC report line {line}: unrecognized status token {raw_status:?}");
            skipped.push(SkippedRow {
                line,
                reason: format!("statut KYC inconnu: {raw_status:?}"),
            });
            continue;
        };

        rows.push(KycUpdate {
            prestataire_id: prestataire_id.to_string(),
            status,
            account_number: sheet.cell(row, account_number_col).map(str::to_string),
            account_name: sheet.cell(row, account_name_col).map(str::to_string),
            operator: sheet.cell(row, operator_col).map(str::to_string),
            verified_date: sheet
                .cell(row, verified_date_col)
                .and_then(parse_report_date),
        });
    }

    Ok(ParsedReport { rows, skipped })
}
