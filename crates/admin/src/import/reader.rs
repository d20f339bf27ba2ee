//! Decoding uploaded files into rows.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xlsb`, `.xls`, `.ods`) are read with
//! `calamine`; delimited text with `csv`. Only the first worksheet is read and
//! its first row supplies the headers.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;

use super::mapper::{Cell, Row};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Errors that make an upload unreadable as a whole.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook has no worksheets")]
    NoWorksheet,

    #[error("could not read delimited text: {0}")]
    Delimited(#[from] csv::Error),
}

/// How an upload is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Workbook,
    Delimited { delimiter: u8 },
}

impl SourceFormat {
    /// Pick a format from the file extension, falling back to the leading bytes.
    #[must_use]
    pub fn detect(file_name: Option<&str>, bytes: &[u8]) -> Self {
        file_name
            .and_then(Self::from_file_name)
            .unwrap_or_else(|| Self::sniff(bytes))
    }

    /// Format implied by a file extension, if recognised.
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            "csv" | "txt" => Some(Self::Delimited { delimiter: b',' }),
            "tsv" => Some(Self::Delimited { delimiter: b'\t' }),
            _ => None,
        }
    }

    fn sniff(bytes: &[u8]) -> Self {
        if bytes.starts_with(ZIP_MAGIC) || bytes.starts_with(OLE_MAGIC) {
            Self::Workbook
        } else {
            Self::Delimited { delimiter: b',' }
        }
    }
}

/// Decode every non-blank data row.
///
/// # Errors
///
/// Returns [`DecodeError`] if the bytes are not a readable file of `format`.
pub fn read_rows(bytes: &[u8], format: SourceFormat) -> Result<Vec<Row>, DecodeError> {
    let rows = match format {
        SourceFormat::Workbook => read_workbook(bytes)?,
        SourceFormat::Delimited { delimiter } => read_delimited(bytes, delimiter)?,
    };
    Ok(rows.into_iter().filter(|row| !row.is_blank()).collect())
}

fn read_workbook(bytes: &[u8]) -> Result<Vec<Row>, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DecodeError::NoWorksheet)??;

    let mut sheet_rows = range.rows();
    let Some(header_row) = sheet_rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<String> = header_row.iter().map(ToString::to_string).collect();

    Ok(sheet_rows
        .enumerate()
        .map(|(index, cells)| {
            let mut row = Row::new(index + 1);
            for (header, data) in headers.iter().zip(cells) {
                if !header.trim().is_empty() {
                    row.insert(header, cell_from_data(data));
                }
            }
            row
        })
        .collect())
}

#[allow(clippy::cast_precision_loss)] // Spreadsheet integers are prices and codes
fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from(s.as_str()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        _ => Cell::Empty,
    }
}

fn read_delimited(bytes: &[u8], delimiter: u8) -> Result<Vec<Row>, DecodeError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let mut row = Row::new(index + 1);
        for (header, value) in headers.iter().zip(record.iter()) {
            if !header.trim().is_empty() {
                row.insert(header, Cell::from(value));
            }
        }
        rows.push(row);
    }
    Ok(rows)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::import::columns::Field;

    #[test]
    fn test_detect_by_extension() {
        assert_eq!(
            SourceFormat::detect(Some("catalog.XLSX"), b""),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::detect(Some("prices.tsv"), b"PK\x03\x04"),
            SourceFormat::Delimited { delimiter: b'\t' }
        );
        assert_eq!(
            SourceFormat::detect(Some("export.csv"), b""),
            SourceFormat::Delimited { delimiter: b',' }
        );
    }

    #[test]
    fn test_detect_by_content() {
        assert_eq!(
            SourceFormat::detect(Some("upload"), b"PK\x03\x04rest"),
            SourceFormat::Workbook
        );
        assert_eq!(SourceFormat::detect(None, OLE_MAGIC), SourceFormat::Workbook);
        assert_eq!(
            SourceFormat::detect(None, b"Name,Price\n"),
            SourceFormat::Delimited { delimiter: b',' }
        );
    }

    #[test]
    fn test_read_csv_skips_blank_rows_and_keeps_numbers() {
        let csv = "\u{feff}Product Name,Category,Base Price\nPoha 500g,Breakfast,45\n,,\nUpma Rava,breakfast,38.5\n";
        let rows = read_rows(csv.as_bytes(), SourceFormat::Delimited { delimiter: b',' }).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert_eq!(rows[0].field(Field::Name).as_deref(), Some("Poha 500g"));
        assert_eq!(rows[1].number, 3);
        assert_eq!(rows[1].field(Field::Category).as_deref(), Some("breakfast"));
        assert_eq!(rows[1].field(Field::BasePrice).as_deref(), Some("38.5"));
    }

    #[test]
    fn test_read_tsv() {
        let tsv = "name\tPrice\nCardamom 50g\t120\n";
        let rows = read_rows(tsv.as_bytes(), SourceFormat::Delimited { delimiter: b'\t' }).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field(Field::Name).as_deref(), Some("Cardamom 50g"));
    }

    #[test]
    fn test_short_records_are_tolerated() {
        let csv = "Name,Brand,Price\nSalt\n";
        let rows = read_rows(csv.as_bytes(), SourceFormat::Delimited { delimiter: b',' }).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field(Field::BrandName), None);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let rows = read_rows(b"", SourceFormat::Delimited { delimiter: b',' }).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_garbage_workbook_is_a_decode_error() {
        let err = read_rows(b"PK\x03\x04not really a zip", SourceFormat::Workbook).unwrap_err();
        assert!(matches!(err, DecodeError::Workbook(_)));
    }

    #[test]
    fn test_invalid_utf8_is_a_decode_error() {
        let bytes = b"Name,Price\n\xff\xfe,1\n";
        let err = read_rows(bytes, SourceFormat::Delimited { delimiter: b',' }).unwrap_err();
        assert!(matches!(err, DecodeError::Delimited(_)));
    }
}
