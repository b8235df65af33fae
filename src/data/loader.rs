use std::io;
use std::path::Path;

use thiserror::Error;

use super::model::{
    FinancialDataset, FinancialRecord, OperationalDataset, OperationalRecord,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0} table has no rows")]
    Empty(&'static str),
}

pub type Result<T> = std::result::Result<T, LoadError>;

// ---------------------------------------------------------------------------
// File names of the two ANAC extracts
// ---------------------------------------------------------------------------

pub const OPERATIONAL_FILE: &str = "anac_dados_estatisticos.csv";
pub const FINANCIAL_FILE: &str = "demonstrativos.csv";

// ---------------------------------------------------------------------------
// Operational table
// ---------------------------------------------------------------------------

/// Read the operational statistics table from any reader.
///
/// Header row required; the `dt_referencia` column is parsed as an ISO
/// date, numeric columns may be empty.
pub fn read_operational<R: io::Read>(reader: R) -> Result<OperationalDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<OperationalRecord>() {
        records.push(row?);
    }
    OperationalDataset::from_records(records).ok_or(LoadError::Empty("operational"))
}

/// Load the operational statistics table from disk.
pub fn load_operational(path: &Path) -> Result<OperationalDataset> {
    let file = std::fs::File::open(path)?;
    read_operational(io::BufReader::new(file))
}

// ---------------------------------------------------------------------------
// Financial table
// ---------------------------------------------------------------------------

/// Read the financial statements table from any reader.
pub fn read_financial<R: io::Read>(reader: R) -> Result<FinancialDataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();
    for row in csv_reader.deserialize::<FinancialRecord>() {
        records.push(row?);
    }
    FinancialDataset::from_records(records).ok_or(LoadError::Empty("financial"))
}

/// Load the financial statements table from disk.
pub fn load_financial(path: &Path) -> Result<FinancialDataset> {
    let file = std::fs::File::open(path)?;
    read_financial(io::BufReader::new(file))
}
