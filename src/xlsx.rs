//! Sim workbooks (`.xlsx` / `.xlsm`) read through calamine.

use crate::error::{LogError, Result};
use crate::grid::{GridSource, Sheet};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};
use chrono::{Duration, NaiveDate, Timelike};
use log::debug;
use std::collections::HashMap;
use std::path::Path;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// A workbook whose sheet ranges are all loaded when it is opened.
pub struct XlsxGrid {
    ranges: HashMap<String, Range<Data>>,
}

impl XlsxGrid {
    pub fn open(path: &Path) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| LogError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;

        let mut ranges = HashMap::new();
        for name in workbook.sheet_names() {
            let range = workbook
                .worksheet_range(&name)
                .map_err(|source| LogError::Workbook {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!("Loaded sheet {} ({:?})", name, range.get_size());
            ranges.insert(name, range);
        }

        Ok(Self { ranges })
    }
}

impl GridSource for XlsxGrid {
    fn cell(&self, sheet: Sheet, coordinate: &str) -> Result<String> {
        let read_error = |context| LogError::CellRead {
            sheet: sheet.to_string(),
            cell: coordinate.to_string(),
            context,
        };

        let range = self
            .ranges
            .get(sheet.as_str())
            .ok_or_else(|| read_error("sheet is missing"))?;
        let position = parse_coordinate(coordinate).ok_or_else(|| read_error("bad coordinate"))?;

        match range.get_value(position) {
            None => Ok(String::new()),
            Some(Data::Error(_)) => Err(read_error("cell holds an error value")),
            Some(value) => Ok(render(value)),
        }
    }
}

/// Zero-based (row, column) for a coordinate like `AB12`.
pub fn parse_coordinate(coordinate: &str) -> Option<(u32, u32)> {
    let split = coordinate.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = coordinate.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let column = letters.chars().fold(0u32, |acc, c| {
        acc * 26 + (c.to_ascii_uppercase() as u8 - b'A' + 1) as u32
    });
    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row - 1, column - 1))
}

fn render(value: &Data) -> String {
    match value {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (*f as i64).to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => render_serial(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// Excel serial days: the integer part is a date, the fraction a time of day.
pub(crate) fn render_serial(serial: f64) -> String {
    let days = serial.trunc();
    let seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;
    let time = chrono::NaiveTime::MIN + Duration::seconds(seconds);
    let clock = format!("{}:{:02}", time.hour(), time.minute());

    let Some(epoch) = NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return clock;
    };
    let date = (epoch + Duration::days(days as i64)).format("%-m/%-d/%Y");

    match (days == 0.0, seconds == 0) {
        (true, _) => clock,
        (false, true) => date.to_string(),
        (false, false) => format!("{} {}", date, clock),
    }
}
