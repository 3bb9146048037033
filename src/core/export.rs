use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::core::aggregate::ExportTable;
use crate::models::TeamNames;

/// Errors that can occur while encoding or decoding an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV writer could not be flushed: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Serialize an export table as CSV
///
/// Fields containing a comma, quote or line break are wrapped in double
/// quotes with embedded quotes doubled. One row per line, header first.
pub fn to_csv(table: &ExportTable) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for row in &table.rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    let mut text = String::from_utf8(bytes)?;
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Parse CSV text back into an export table
pub fn parse_csv(text: &str) -> Result<ExportTable, ExportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(ExportTable { rows })
}

/// Attachment payload for the email relay
pub fn encode_attachment(csv: &str) -> String {
    STANDARD.encode(csv.as_bytes())
}

/// `jackattack_{A}_vs_{B}.csv`, whitespace runs collapsed to underscores
pub fn export_filename(teams: &TeamNames) -> String {
    let raw = format!("jackattack_{}_vs_{}.csv", teams.a, teams.b);
    raw.split_whitespace().collect::<Vec<_>>().join("_")
}

pub fn export_subject(teams: &TeamNames) -> String {
    format!("Final score: {} vs {}", teams.a, teams.b)
}
