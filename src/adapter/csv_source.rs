use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::de::DeserializeOwned;

use crate::error::VoucherError;
use crate::model::{CSVBarcodeEntity, CSVOrderEntity, ExportedBarcode, ExportedOrder, FieldError};
use crate::Result;

/// Accepted header names for each required column, the first one being the
/// canonical name.
const BARCODE_COLUMNS: &[&[&str]] = &[&["barcode", "value"]];
const ORDER_COLUMNS: &[&[&str]] = &[&["order_id", "id"], &["customer_id", "customer"]];

/// Optional column of the order source. When present, every order must list
/// its barcodes.
const ORDER_BARCODES_COLUMN: &[&str] = &["barcodes", "barcode"];

/// A named CSV data source.
///
/// The column layout is determined from the header line, so the ordering of
/// the columns does not matter and unknown columns are ignored.
pub struct CsvSource {
    /// Name used to report errors, usually the path of the file.
    name: String,
    reader: Box<dyn Read>,
}

impl CsvSource {
    /// Create a source from any reader.
    pub fn new(name: impl Into<String>, reader: Box<dyn Read>) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// Open a CSV file.
    /// Fails with [VoucherError::SourceNotFound] if the path does not point
    /// to a readable regular file.
    pub fn open(path: &Path) -> Result<Self> {
        let not_found = |source: io::Error| VoucherError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        };
        if !path.exists() {
            return Err(not_found(io::ErrorKind::NotFound.into()).into());
        }
        if !path.is_file() {
            let source = io::Error::new(io::ErrorKind::Other, "not a regular file");
            return Err(not_found(source).into());
        }
        let file = File::open(path).map_err(not_found)?;

        Ok(Self::new(
            path.display().to_string(),
            Box::new(BufReader::new(file)),
        ))
    }

    /// Read the barcodes, optionally assigned to orders.
    pub fn read_barcodes(self) -> Result<Vec<ExportedBarcode>> {
        self.read_rows(BARCODE_COLUMNS, |entity: CSVBarcodeEntity, _| entity.into_exported())
    }

    /// Read the orders and their customers.
    /// If the header has a barcodes column, a row with an empty barcode list
    /// is malformed.
    pub fn read_orders(self) -> Result<Vec<ExportedOrder>> {
        self.read_rows(ORDER_COLUMNS, |entity: CSVOrderEntity, headers| {
            entity.into_exported(has_column(headers, ORDER_BARCODES_COLUMN))
        })
    }

    /// Read every row, stopping at the first malformed one.
    fn read_rows<E, T>(
        self,
        required: &[&[&str]],
        convert: impl Fn(E, &StringRecord) -> std::result::Result<Option<T>, FieldError>,
    ) -> Result<Vec<T>>
    where
        E: DeserializeOwned,
    {
        let Self { name, reader } = self;
        debug!("Reading CSV source '{}'.", name);
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|error| malformed_csv(&name, error))?
            .clone();
        for columns in required {
            if !has_column(&headers, columns) {
                return Err(malformed(&name, 1, format!("missing column '{}'", columns[0])));
            }
        }

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result.map_err(|error| malformed_csv(&name, error))?;
            let line = row.position().map_or(0, |position| position.line());
            let entity: E = row
                .deserialize(Some(&headers))
                .map_err(|error| malformed(&name, line, error.to_string()))?;

            let record = convert(entity, &headers)
                .map_err(|error| malformed(&name, line, error.to_string()))?;
            match record {
                Some(record) => records.push(record),
                None => debug!("{} line {}: skipping blank row.", name, line),
            }
        }
        debug!("Read {} records from '{}'.", records.len(), name);

        Ok(records)
    }
}

fn has_column(headers: &StringRecord, names: &[&str]) -> bool {
    headers.iter().any(|header| names.contains(&header))
}

fn malformed(name: &str, line: u64, reason: String) -> anyhow::Error {
    VoucherError::MalformedRow {
        source_name: name.to_string(),
        line,
        reason,
    }
    .into()
}

fn malformed_csv(name: &str, error: csv::Error) -> anyhow::Error {
    let line = error.position().map_or(0, |position| position.line());

    malformed(name, line, error.to_string())
}
