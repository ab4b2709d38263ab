//! Payment report parsing.

use log::warn;

use crate::domain::prestataire::PaymentUpdate;
use crate::domain::status::PaymentStatus;
use crate::reports::{parse_amount, parse_report_date, ParsedReport, ReportError, Sheet, SkippedRow};

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
    "statut de paiement",
    "payment status",
    "statut paiement",
    "statut",
    "status",
    "etat",
];
const DATE_SYNONYMS: &[&str] = &["date de paiement", "payment date", "date paiement", "date"];
const AMOUNT_SYNONYMS: &[&str] = &["montant paye", "montant", "amount", "amount paid"];
const CURRENCY_SYNONYMS: &[&str] = &["devise", "currency", "monnaie"];
const REFERENCE_SYNONYMS: &[&str] = &[
    "reference de transaction",
    "numero de transaction",
    "transaction id",
    "reference",
    "ref",
];

/// Parses a payment report sheet into normalized updates.
///
/// The prestataire id and status columns are mandatory; everything else is
/// best effort. Rows with a missing id or an unrecognized status token are
/// skipped and reported, the rest of the file is still processed.
pub fn parse_payment_report(sheet: &Sheet) -> Result<ParsedReport<PaymentUpdate>, ReportError> {
    let id_col = sheet
        .locate_column(ID_SYNONYMS)
        .ok_or(ReportError::MissingColumn("identifiant du prestataire"))?;
    let status_col = sheet
        .locate_column(STATUS_SYNONYMS)
        .ok_or(ReportError::MissingColumn("statut de paiement"))?;
    let date_col = sheet.locate_column(DATE_SYNONYMS);
    let amount_col = sheet.locate_column(AMOUNT_SYNONYMS);
    let currency_col = sheet.locate_column(CURRENCY_SYNONYMS);
    let reference_col = sheet.locate_column(REFERENCE_SYNONYMS);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();

    for (index, row) in sheet.rows.iter().enumerate() {
        let line = index + 2; // 1-based, after the header line

        let Some(prestataire_id) = sheet.cell(row, Some(id_col)) else {
            skipped.push(SkippedRow {
                line,
                reason: "identifiant du prestataire manquant".to_string(),
            });
            continue;
        };

        let raw_status = sheet.cell(row, Some(status_col)).unwrap_or("");
        let Some(status) = PaymentStatus::parse(raw_status) else {
            warn!("Payment report line {line}: unrecognized status token {raw_status:?}");
            skipped.push(SkippedRow {
                line,
                reason: format!("statut de paiement inconnu: {raw_status:?}"),
            });
            continue;
        };

        rows.push(PaymentUpdate {
            prestataire_id: prestataire_id.to_string(),
            status,
            payment_date: sheet.cell(row, date_col).and_then(parse_report_date),
            amount: sheet.cell(row, amount_col).and_then(parse_amount),
            currency: sheet.cell(row, currency_col).map(str::to_string),
            reference: sheet.cell(row, reference_col).map(str::to_string),
        });
    }

    Ok(ParsedReport { rows, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parse(csv: &str) -> ParsedReport<PaymentUpdate> {
        let sheet = Sheet::from_bytes(Some("report.csv"), csv.as_bytes()).unwrap();
        parse_payment_report(&sheet).unwrap()
    }

    #[test]
    fn minimal_english_report_parses() {
        let report = parse("prestataire id,status,date\nP001,PAID,2024-01-01\n");
        assert_eq!(report.rows.len(), 1);
        assert!(report.skipped.is_empty());
        let row = &report.rows[0];
        assert_eq!(row.prestataire_id, "P001");
        assert_eq!(row.status, PaymentStatus::Paid);
        assert_eq!(row.payment_date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn french_headers_and_tokens_parse() {
        let report = parse(
            "ID du prestataire,Statut de paiement,Date de paiement,Montant,Devise\n\
             P001,PAYÉ,01/02/2024,1250,CDF\n\
             P002,EN ATTENTE,,,\n",
        );
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].status, PaymentStatus::Paid);
        assert_eq!(
            report.rows[0].payment_date,
            NaiveDate::from_ymd_opt(2024, 2, 1)
        );
        assert_eq!(report.rows[0].amount, Some(1250.0));
        assert_eq!(report.rows[0].currency.as_deref(), Some("CDF"));
        assert_eq!(report.rows[1].status, PaymentStatus::Pending);
        assert_eq!(report.rows[1].payment_date, None);
    }

    #[test]
    fn unknown_status_skips_row_but_not_file() {
        let report = parse(
            "id,statut\nP001,PAID\nP002,BIZARRE\nP003,ECHEC\n",
        );
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].line, 3);
        assert_eq!(report.rows[1].status, PaymentStatus::Failed);
    }

    #[test]
    fn missing_id_skips_row() {
        let report = parse("id,statut\n,PAID\nP002,PAID\n");
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.skipped[0].line, 2);
    }

    #[test]
    fn missing_status_column_is_fatal() {
        let sheet = Sheet::from_bytes(Some("r.csv"), b"id,montant\nP001,5\n").unwrap();
        assert!(matches!(
            parse_payment_report(&sheet),
            Err(ReportError::MissingColumn(_))
        ));
    }

    #[test]
    fn accented_garbage_date_keeps_the_row() {
        let report = parse("id,statut,date\nP001,PAID,123456789é\n");
        assert_eq!(report.rows.len(), 1);
        assert!(report.skipped.is_empty());
        assert_eq!(report.rows[0].payment_date, None);
    }

    #[test]
    fn excel_serial_dates_are_accepted() {
        let report = parse("id,statut,date\nP001,PAID,45292\n");
        assert_eq!(
            report.rows[0].payment_date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
    }
}
