use crate::error::EstimateError;
use crate::estimator::Estimate;
use crate::rates::{RateTableConfig, RateTables};
use serde_json::Error as SerdeJsonError;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

#[derive(Debug)]
pub enum ExportError {
    Serialization(SerdeJsonError),
    Io(io::Error),
    Csv(csv::Error),
    InvalidData(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialization(err) => write!(f, "serialization error: {err}"),
            ExportError::Io(err) => write!(f, "io error: {err}"),
            ExportError::Csv(err) => write!(f, "csv error: {err}"),
            ExportError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<SerdeJsonError> for ExportError {
    fn from(value: SerdeJsonError) -> Self {
        Self::Serialization(value)
    }
}

impl From<io::Error> for ExportError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<EstimateError> for ExportError {
    fn from(value: EstimateError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Writes the bid-form attachment: a two-column label/day-count table with a
/// total row. The file starts with a UTF-8 BOM so spreadsheet software
/// detects the encoding and renders the stage labels intact.
pub fn save_breakdown_to_csv<P: AsRef<Path>>(estimate: &Estimate, path: P) -> ExportResult<()> {
    let mut file = File::create(path)?;
    file.write_all("\u{feff}".as_bytes())?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(["項目", "天數"])?;
    for line in &estimate.breakdown {
        writer.write_record([line.stage.label(), &line.days.to_string()])?;
    }
    writer.write_record(["總工期", &estimate.total_days.to_string()])?;
    writer.flush()?;
    Ok(())
}

pub fn save_estimate_to_json<P: AsRef<Path>>(estimate: &Estimate, path: P) -> ExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, estimate)?;
    Ok(())
}

pub fn load_estimate_from_json<P: AsRef<Path>>(path: P) -> ExportResult<Estimate> {
    let file = File::open(path)?;
    let estimate: Estimate = serde_json::from_reader(file)?;
    Ok(estimate)
}

pub fn save_rate_config_to_json<P: AsRef<Path>>(
    config: &RateTableConfig,
    path: P,
) -> ExportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}

/// Loads and validates externalized rate tables. Incomplete axes fail here,
/// before any estimate runs against them.
pub fn load_rate_tables_from_json<P: AsRef<Path>>(path: P) -> ExportResult<RateTables> {
    let file = File::open(path)?;
    let config: RateTableConfig = serde_json::from_reader(file)?;
    let tables = RateTables::from_config(config)?;
    Ok(tables)
}
