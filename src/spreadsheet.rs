use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::error::SpreadsheetError;
use crate::exchange_rate::{RateRecord, RateValue};

pub const SHEET_NAME: &str = "Exchange Rates";
pub const MISSING_DATE: &str = "N/A";

pub const HEADERS: [&str; 26] = [
    "Date",
    "USD/CNY",
    "EUR/CNY",
    "100JPY/CNY",
    "HKD/CNY",
    "GBP/CNY",
    "AUD/CNY",
    "NZD/CNY",
    "SGD/CNY",
    "CHF/CNY",
    "CAD/CNY",
    "CNY/MOP",
    "CNY/MYR",
    "CNY/RUB",
    "CNY/ZAR",
    "CNY/KRW",
    "CNY/AED",
    "CNY/SAR",
    "CNY/HUF",
    "CNY/PLN",
    "CNY/DKK",
    "CNY/SEK",
    "CNY/NOK",
    "CNY/TRY",
    "CNY/MXN",
    "CNY/THB",
];

pub const COLUMNS: usize = HEADERS.len();

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(Decimal),
    Empty,
}

impl From<&RateValue> for Cell {
    fn from(value: &RateValue) -> Self {
        match value {
            RateValue::Number(number) => Cell::Number(*number),
            RateValue::Text(text) => Cell::Text(text.clone()),
            RateValue::Blank => Cell::Empty,
            RateValue::Other(other) => Cell::Text(other.to_string()),
        }
    }
}

/// Header row followed by one row per record. Every row is `COLUMNS` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetDocument {
    rows: Vec<Vec<Cell>>,
}

impl SpreadsheetDocument {
    pub fn from_records(records: &[RateRecord]) -> Self {
        let header = HEADERS
            .iter()
            .map(|label| Cell::Text(label.to_string()))
            .collect();

        let mut rows = Vec::with_capacity(records.len() + 1);
        rows.push(header);
        rows.extend(records.iter().map(record_row));

        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn save(&self, path: &Path) -> Result<(), SpreadsheetError> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        for (row, cells) in self.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                write_cell(sheet, row as u32, col as u16, cell)?;
            }
        }

        workbook.save(path)?;

        Ok(())
    }
}

fn record_row(record: &RateRecord) -> Vec<Cell> {
    let date = record.date.as_deref().unwrap_or(MISSING_DATE);

    if record.values.len() > COLUMNS - 1 {
        warn!(
            "Record {} has {} values, keeping the first {}",
            date,
            record.values.len(),
            COLUMNS - 1
        );
    }

    let mut row = Vec::with_capacity(COLUMNS);
    row.push(Cell::Text(date.to_string()));
    row.extend(record.values.iter().take(COLUMNS - 1).map(Cell::from));
    row.resize(COLUMNS, Cell::Empty);
    row
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), XlsxError> {
    match cell {
        Cell::Text(text) => {
            sheet.write_string(row, col, text)?;
        }
        Cell::Number(number) => match number.to_f64() {
            Some(value) => {
                sheet.write_number(row, col, value)?;
            }
            None => {
                sheet.write_string(row, col, number.to_string())?;
            }
        },
        Cell::Empty => {}
    }

    Ok(())
}

/// Directory holding the running executable.
pub fn program_directory() -> Result<PathBuf, SpreadsheetError> {
    let exe = std::env::current_exe().map_err(SpreadsheetError::ProgramDirectory)?;

    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        SpreadsheetError::ProgramDirectory(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} has no parent directory", exe.display()),
        ))
    })
}

/// Save `records` as `dir/filename`, replacing any file already there.
/// Returns the absolute path written.
pub fn write_records(
    records: &[RateRecord],
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, SpreadsheetError> {
    let path = std::path::absolute(dir.join(filename))?;

    SpreadsheetDocument::from_records(records).save(&path)?;

    Ok(path)
}
