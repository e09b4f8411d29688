//! Rate-table sources: a thin HTTP client for the default rates resource and
//! a local-file reader for user uploads.
//!
//! Both paths are one-shot: fetch or read the bytes, sniff the format, parse
//! the first sheet/table into raw rows. Any failure surfaces as [`LoadError`]
//! before the session is touched, so a failed load always leaves the previous
//! table intact.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use reqwest::{Client, Url};
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::normalize::RawRow;

/// Resource name the original deployment serves its default table under.
const DEFAULT_RATES_RESOURCE: &str = "shipping-rates.xlsx";
const USER_AGENT: &str = "shipping-quoter/0.1.0";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook has no sheets")]
    EmptyWorkbook,
}

/// Source data format, sniffed from the resource name or the bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableFormat {
    Xlsx,
    Csv,
}

impl TableFormat {
    /// By file extension, `.csv` aside everything goes through the workbook
    /// reader (the original only ever shipped `.xlsx`).
    pub fn from_name(name: &str) -> Self {
        if name.to_ascii_lowercase().ends_with(".csv") {
            TableFormat::Csv
        } else {
            TableFormat::Xlsx
        }
    }

    /// XLSX files are ZIP archives; anything without the magic is read as CSV.
    pub fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(b"PK") {
            TableFormat::Xlsx
        } else {
            TableFormat::Csv
        }
    }
}

/// Thin asynchronous client for fetching rate tables over HTTP.
#[derive(Clone, Debug)]
pub struct RatesClient {
    http: Client,
    base_url: Url,
}

impl RatesClient {
    pub fn new(base: &str) -> Result<Self, LoadError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches the deployment's default rate table.
    pub async fn fetch_default(&self) -> Result<Vec<RawRow>, LoadError> {
        self.fetch(DEFAULT_RATES_RESOURCE).await
    }

    /// Fetches `resource` (joined onto the base URL) and parses it.
    pub async fn fetch(&self, resource: &str) -> Result<Vec<RawRow>, LoadError> {
        let url = self.base_url.join(resource)?;
        debug!(%url, "requesting rate table");
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        let format = TableFormat::from_name(resource);
        let rows = parse_table(&bytes, format)?;
        info!(%url, rows = rows.len(), "loaded rate table");
        Ok(rows)
    }
}

/// Reads a user-selected rates file; format by extension.
pub async fn read_rates_file(path: &Path) -> Result<Vec<RawRow>, LoadError> {
    let bytes = tokio::fs::read(path).await?;
    let format = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(TableFormat::from_name)
        .unwrap_or_else(|| TableFormat::sniff(&bytes));
    let rows = parse_table(&bytes, format)?;
    info!(path = %path.display(), rows = rows.len(), "loaded rate table from file");
    Ok(rows)
}

pub fn parse_table(bytes: &[u8], format: TableFormat) -> Result<Vec<RawRow>, LoadError> {
    match format {
        TableFormat::Xlsx => parse_workbook(bytes),
        TableFormat::Csv => parse_csv_rows(bytes),
    }
}

/// Parses the first sheet of a workbook. The first row is the header; empty
/// cells become empty strings so alias resolution sees every column.
pub fn parse_workbook(bytes: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(LoadError::EmptyWorkbook)??;

    let mut rows = Vec::new();
    let mut row_iter = range.rows();
    let Some(header) = row_iter.next() else {
        return Ok(rows);
    };
    let headers: Vec<String> = header.iter().map(cell_to_header).collect();

    for record in row_iter {
        let mut row = RawRow::new();
        for (index, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let value = record.get(index).map(cell_to_value).unwrap_or_else(|| {
                serde_json::Value::String(String::new())
            });
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Parses CSV bytes; headers come from the first record.
pub fn parse_csv_rows(bytes: &[u8]) -> Result<Vec<RawRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (index, header) in headers.iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            let cell = record.get(index).unwrap_or_default();
            row.insert(
                header.to_string(),
                serde_json::Value::String(cell.to_string()),
            );
        }
        rows.push(row);
    }
    Ok(rows)
}

fn cell_to_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn cell_to_value(cell: &Data) -> serde_json::Value {
    match cell {
        Data::Empty => serde_json::Value::String(String::new()),
        Data::String(s) => serde_json::Value::String(s.clone()),
        Data::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or_else(|| serde_json::Value::String(f.to_string())),
        Data::Int(i) => serde_json::Value::Number((*i).into()),
        Data::Bool(b) => serde_json::Value::Bool(*b),
        other => serde_json::Value::String(other.to_string()),
    }
}
