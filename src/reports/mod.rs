//! Payment and KYC report parsing.
//!
//! Partners upload CSV or XLSX files whose column headers vary between
//! French and English and between exports. Columns are located by fuzzy
//! header matching and rows with unusable values are skipped, never fatal.

use std::io::Cursor;

use calamine::{Data, Reader};
use chrono::{Duration, NaiveDate};
use thiserror::Error;

use crate::domain::status::normalize_token;

pub mod kyc;
pub mod payment;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Format de fichier non supporté: {0}")]
    UnsupportedFormat(String),

    #[error("Fichier CSV illisible: {0}")]
    Csv(#[from] csv::Error),

    #[error("Classeur XLSX illisible: {0}")]
    Xlsx(String),

    #[error("Colonne obligatoire introuvable: {0}")]
    MissingColumn(&'static str),

    #[error("Le fichier ne contient aucune ligne")]
    Empty,
}

/// Row skipped during parsing, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedRow {
    /// 1-based line number in the source file, headers included.
    pub line: usize,
    pub reason: String,
}

/// Parse result carrying both the usable rows and the skipped ones.
#[derive(Debug)]
pub struct ParsedReport<T> {
    pub rows: Vec<T>,
    pub skipped: Vec<SkippedRow>,
}

/// A tabular file decoded into strings, independent of the source format.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

const XLSX_MAGIC: &[u8] = b"PK\x03\x04";

impl Sheet {
    /// Decodes an uploaded report, picking the format from the file name
    /// extension with a content sniff as fallback.
    pub fn from_bytes(filename: Option<&str>, bytes: &[u8]) -> Result<Self, ReportError> {
        let extension = filename
            .and_then(|name| name.rsplit('.').next())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("csv") | Some("txt") => Self::from_csv(bytes),
            Some("xlsx") | Some("xls") => Self::from_xlsx(bytes),
            // Unknown extension: sniff the zip container magic.
            _ if bytes.starts_with(XLSX_MAGIC) => Self::from_xlsx(bytes),
            _ => Self::from_csv(bytes),
        }
    }

    fn from_csv(bytes: &[u8]) -> Result<Self, ReportError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(bytes);

        let headers = reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if headers.is_empty() {
            return Err(ReportError::Empty);
        }

        Ok(Self { headers, rows })
    }

    fn from_xlsx(bytes: &[u8]) -> Result<Self, ReportError> {
        let cursor = Cursor::new(bytes.to_vec());
        let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ReportError::Empty)?
            .map_err(|e| ReportError::Xlsx(e.to_string()))?;

        let mut iter = range.rows();
        let headers = iter
            .next()
            .ok_or(ReportError::Empty)?
            .iter()
            .map(cell_to_string)
            .collect::<Vec<_>>();

        let rows = iter
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Ok(Self { headers, rows })
    }

    /// Locates a column by synonym list: exact normalized match first, then
    /// substring containment in either direction.
    pub fn locate_column(&self, synonyms: &[&str]) -> Option<usize> {
        let normalized: Vec<String> = self.headers.iter().map(|h| normalize_token(h)).collect();

        for synonym in synonyms {
            let wanted = normalize_token(synonym);
            if let Some(idx) = normalized.iter().position(|h| *h == wanted) {
                return Some(idx);
            }
        }
        for synonym in synonyms {
            let wanted = normalize_token(synonym);
            if wanted.is_empty() {
                continue;
            }
            if let Some(idx) = normalized
                .iter()
                .position(|h| !h.is_empty() && (h.contains(&wanted) || wanted.contains(h.as_str())))
            {
                return Some(idx);
            }
        }
        None
    }

    pub fn cell<'a>(&self, row: &'a [String], idx: Option<usize>) -> Option<&'a str> {
        idx.and_then(|i| row.get(i))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("{e:?}"),
    }
}

// Excel counts days from 1899-12-30 (serial 1 = 1900-01-01 with the
// historical leap-year quirk folded in).
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Parses a report date from ISO strings, `DD/MM/YYYY` variants or Excel
/// serial numbers. Returns `None` for anything unparseable.
pub fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    // ISO timestamps: keep the date part. `get` rather than a byte slice,
    // the tenth byte of an arbitrary cell can sit inside a multibyte char.
    if let Some(prefix) = s.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(date);
        }
    }

    for format in ["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Some(date);
        }
    }

    if let Ok(serial) = s.parse::<f64>() {
        // Anything outside 1900..~2100 is not a plausible report date.
        if (60.0..80000.0).contains(&serial) {
            let (y, m, d) = EXCEL_EPOCH;
            let epoch = NaiveDate::from_ymd_opt(y, m, d)?;
            return epoch.checked_add_signed(Duration::days(serial.trunc() as i64));
        }
    }

    None
}

/// Parses an amount, tolerating a comma decimal separator and spaces.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
