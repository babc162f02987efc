//! Decoding uploaded files into their first column.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use serde::Serialize;

use crate::{parse, ParseError};

/// Shape of an uploaded file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Format {
    /// UTF-8 delimited text.
    Delimited,
    /// Spreadsheet workbook, only the first sheet is read.
    Workbook,
    /// ISO-8859-1 text with whitespace separated columns and no header,
    /// what SIE files look like.
    FixedWidth,
}

/// Guess the format from the file name.
///
/// This only looks for "csv" or "xls" anywhere in the name, in that order,
/// so "csvreport.txt" is read as delimited text.
pub fn detect_format(filename: &str) -> Format {
    if filename.contains("csv") {
        Format::Delimited
    } else if filename.contains("xls") {
        Format::Workbook
    } else {
        Format::FixedWidth
    }
}

/// Read the first column values of delimited text.
///
/// There is no header row and rows may have any number of fields.
pub fn read_delimited(
    filename: &str,
    bytes: &[u8],
    delimiter: u8,
) -> Result<Vec<String>, ParseError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ParseError::decode(filename, e))?;

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut ret = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| ParseError::decode(filename, e))?;
        match record.get(0) {
            Some(cell) if !cell.is_empty() => ret.push(cell.to_owned()),
            _ => {}
        }
    }

    non_empty(filename, ret)
}

/// Read the first column of the first sheet of a workbook.
pub fn read_workbook(
    filename: &str,
    bytes: &[u8],
) -> Result<Vec<String>, ParseError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| ParseError::decode(filename, e))?;

    let Some(range) = workbook.worksheet_range_at(0) else {
        return Err(ParseError::EmptyResult(filename.into()));
    };
    let range = range.map_err(|e| ParseError::decode(filename, e))?;
    log::debug!(
        "read_workbook: {filename:?} first sheet is {:?}",
        range.get_size()
    );

    let ret = range
        .rows()
        .filter_map(|row| match row.first() {
            None | Some(Data::Empty) => None,
            Some(cell) => Some(cell.to_string()),
        })
        .filter(|s| !s.is_empty())
        .collect();

    non_empty(filename, ret)
}

/// Read the records of whitespace separated ISO-8859-1 text.
///
/// Fields have no quoting and columns don't line up between record types,
/// so the first field is taken to run to the end of the line. Only the
/// indentation is stripped, the record marker pattern needs the whitespace
/// that follows the marker.
pub fn read_fixed_width(
    filename: &str,
    bytes: &[u8],
) -> Result<Vec<String>, ParseError> {
    let text = parse::decode_latin1(bytes);

    let ret: Vec<String> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.trim_start().to_owned())
        .collect();
    log::debug!("read_fixed_width: {filename:?} has {} records", ret.len());

    non_empty(filename, ret)
}

fn non_empty(
    filename: &str,
    values: Vec<String>,
) -> Result<Vec<String>, ParseError> {
    if values.is_empty() {
        Err(ParseError::EmptyResult(filename.into()))
    } else {
        Ok(values)
    }
}
