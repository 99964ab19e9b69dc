//! Admin CSV upload. Mocked: the file is parsed and validated, a summary is
//! returned, and nothing is persisted.

use std::collections::BTreeMap;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;

use lineage_core::LineageError;

use crate::error::ApiError;
use crate::state::AppState;

const REQUIRED_COLUMNS: [&str; 4] = ["id", "name", "gender", "birth_date"];
const PREVIEW_ROWS: usize = 5;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct UploadReport {
    pub message: String,
    pub rows_parsed: usize,
    pub columns: Vec<String>,
    pub preview: Vec<BTreeMap<String, String>>,
    pub note: String,
    pub mock_mode: bool,
}

/// `POST /api/upload` (multipart, field `file`)
pub async fn upload_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, ApiError> {
    authorize(&headers, &state.config.admin_token)?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError(LineageError::InvalidInput(format!(
            "malformed multipart body: {e}"
        )))
    })? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                ApiError(LineageError::InvalidInput(format!(
                    "failed to read uploaded file: {e}"
                )))
            })?;
            upload = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) = upload.ok_or_else(|| {
        ApiError(LineageError::InvalidInput("CSV file is required".to_string()))
    })?;

    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(ApiError(LineageError::InvalidInput(
            "only CSV files are allowed".to_string(),
        )));
    }

    let report = parse_persons_csv(&bytes).map_err(ApiError)?;
    tracing::info!(rows = report.rows_parsed, %filename, "Parsed mock CSV upload");
    Ok(Json(report))
}

fn authorize(headers: &HeaderMap, admin_token: &str) -> Result<(), ApiError> {
    let expected = format!("Bearer {admin_token}");
    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if provided != Some(expected.as_str()) {
        return Err(ApiError(LineageError::Unauthorized(
            "invalid or missing admin token".to_string(),
        )));
    }
    Ok(())
}

/// Parse and validate a persons CSV, producing the mock-mode summary.
fn parse_persons_csv(bytes: &[u8]) -> Result<UploadReport, LineageError> {
    let mut reader = csv::Reader::from_reader(bytes);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| LineageError::InvalidInput(format!("failed to read CSV headers: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();

    for required in REQUIRED_COLUMNS {
        if !columns.iter().any(|c| c == required) {
            return Err(LineageError::InvalidInput(format!(
                "required column missing: {required}"
            )));
        }
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            LineageError::InvalidInput(format!("failed to parse CSV row {}: {e}", index + 1))
        })?;

        let row: BTreeMap<String, String> = columns
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();

        if let Some(date) = row.get("birth_date") {
            if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(LineageError::InvalidInput(format!(
                    "row {}: birth_date must be an ISO-8601 calendar date, got '{date}'",
                    index + 1
                )));
            }
        }

        rows.push(row);
    }

    let rows_parsed = rows.len();
    let preview: Vec<BTreeMap<String, String>> = rows.into_iter().take(PREVIEW_ROWS).collect();

    Ok(UploadReport {
        message: "CSV parsed successfully".to_string(),
        rows_parsed,
        columns,
        preview,
        note: "Upload runs in mock mode; no data is persisted".to_string(),
        mock_mode: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CSV: &str = "\
id,name,gender,birth_date,death_date
p1,Asha,female,1950-03-14,
p2,Ravi,male,1948-07-02,2011-09-30
p3,Meera,female,1975-12-01,
";

    #[test]
    fn parses_a_valid_csv() {
        let report = parse_persons_csv(VALID_CSV.as_bytes()).unwrap();
        assert_eq!(report.rows_parsed, 3);
        assert!(report.mock_mode);
        assert_eq!(report.preview.len(), 3);
        assert_eq!(report.preview[0]["id"], "p1");
        assert_eq!(report.preview[1]["death_date"], "2011-09-30");
        assert_eq!(
            report.columns,
            vec!["id", "name", "gender", "birth_date", "death_date"]
        );
    }

    #[test]
    fn preview_is_capped_at_five_rows() {
        let mut csv = String::from("id,name,gender,birth_date\n");
        for i in 0..8 {
            csv.push_str(&format!("p{i},Person {i},other,1980-01-0{}\n", i + 1));
        }
        let report = parse_persons_csv(csv.as_bytes()).unwrap();
        assert_eq!(report.rows_parsed, 8);
        assert_eq!(report.preview.len(), 5);
    }

    #[test]
    fn missing_required_column_is_rejected() {
        let err = parse_persons_csv(b"id,name,birth_date\np1,Asha,1950-03-14\n").unwrap_err();
        assert!(matches!(err, LineageError::InvalidInput(_)));
        assert!(err.to_string().contains("gender"));
    }

    #[test]
    fn bad_birth_date_is_rejected() {
        let err =
            parse_persons_csv(b"id,name,gender,birth_date\np1,Asha,female,14-03-1950\n")
                .unwrap_err();
        assert!(err.to_string().contains("birth_date"));
    }

    #[test]
    fn authorize_requires_the_exact_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(authorize(&headers, "secret").is_err());

        headers.insert(header::AUTHORIZATION, "Bearer wrong".parse().unwrap());
        assert!(authorize(&headers, "secret").is_err());

        headers.insert(header::AUTHORIZATION, "Bearer secret".parse().unwrap());
        assert!(authorize(&headers, "secret").is_ok());
    }
}
