//! Read-only access to the sim's named sheets.

use crate::error::{LogError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    Overview,
    Population,
    Production,
    Construction,
    Explore,
    Rezone,
    Military,
    Magic,
    Techs,
    Imps,
    Constants,
}

impl Sheet {
    pub const ALL: [Sheet; 11] = [
        Sheet::Overview,
        Sheet::Population,
        Sheet::Production,
        Sheet::Construction,
        Sheet::Explore,
        Sheet::Rezone,
        Sheet::Military,
        Sheet::Magic,
        Sheet::Techs,
        Sheet::Imps,
        Sheet::Constants,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sheet::Overview => "Overview",
            Sheet::Population => "Population",
            Sheet::Production => "Production",
            Sheet::Construction => "Construction",
            Sheet::Explore => "Explore",
            Sheet::Rezone => "Rezone",
            Sheet::Military => "Military",
            Sheet::Magic => "Magic",
            Sheet::Techs => "Techs",
            Sheet::Imps => "Imps",
            Sheet::Constants => "Constants",
        }
    }
}

impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only capability the generator needs from a sim document.
pub trait GridSource {
    /// Text of the cell at a spreadsheet coordinate such as `BY4`.
    fn cell(&self, sheet: Sheet, coordinate: &str) -> Result<String>;
}

impl<G: GridSource + ?Sized> GridSource for &G {
    fn cell(&self, sheet: Sheet, coordinate: &str) -> Result<String> {
        (**self).cell(sheet, coordinate)
    }
}

/// Build a coordinate from a column and a 1-based row.
pub fn coordinate(column: &str, row: usize) -> String {
    format!("{}{}", column, row)
}

/// Sheets held in memory as sheet name -> coordinate -> text.
///
/// Unknown sheets and unknown cells are read errors, which makes it a strict
/// test double for the spreadsheet-backed source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryGrid {
    sheets: HashMap<String, HashMap<String, String>>,
}

impl MemoryGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, sheet: Sheet, coordinate: &str, value: impl Into<String>) {
        self.sheets
            .entry(sheet.as_str().to_string())
            .or_default()
            .insert(coordinate.to_string(), value.into());
    }

    /// Builder form of [`MemoryGrid::set`].
    pub fn with(mut self, sheet: Sheet, coordinate: &str, value: impl Into<String>) -> Self {
        self.set(sheet, coordinate, value);
        self
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl GridSource for MemoryGrid {
    fn cell(&self, sheet: Sheet, coordinate: &str) -> Result<String> {
        self.sheets
            .get(sheet.as_str())
            .and_then(|cells| cells.get(coordinate))
            .cloned()
            .ok_or_else(|| LogError::CellRead {
                sheet: sheet.to_string(),
                cell: coordinate.to_string(),
                context: "cell is missing",
            })
    }
}

/// Strip the decorations the sim puts around numbers: whitespace, the
/// `→` marker and thousands separators.
fn clean_number(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '→')
        .replace(',', "")
}

/// Read a cell as trimmed text.
pub fn read_text(
    grid: &impl GridSource,
    sheet: Sheet,
    cell: &str,
    context: &'static str,
) -> Result<String> {
    grid.cell(sheet, cell)
        .map(|value| value.trim().to_string())
        .map_err(|err| with_context(err, context))
}

/// Read a cell as an integer. Blank cells read as zero.
pub fn read_int(
    grid: &impl GridSource,
    sheet: Sheet,
    cell: &str,
    context: &'static str,
) -> Result<i64> {
    let raw = read_text(grid, sheet, cell, context)?;
    let value = clean_number(&raw);
    if value.is_empty() {
        return Ok(0);
    }

    value.parse::<i64>().map_err(|_| LogError::ValueFormat {
        location: format!("{}!{}", sheet, cell),
        value: raw,
        context,
    })
}

/// Read a cell as a decimal. Blank cells read as zero.
pub fn read_decimal(
    grid: &impl GridSource,
    sheet: Sheet,
    cell: &str,
    context: &'static str,
) -> Result<Decimal> {
    let raw = read_text(grid, sheet, cell, context)?;
    let value = clean_number(&raw);
    if value.is_empty() {
        return Ok(Decimal::ZERO);
    }

    Decimal::from_str(&value)
        .or_else(|_| Decimal::from_scientific(&value))
        .map_err(|_| LogError::ValueFormat {
            location: format!("{}!{}", sheet, cell),
            value: raw,
            context,
        })
}

// Read failures carry the caller's description of what was being read.
fn with_context(err: LogError, context: &'static str) -> LogError {
    match err {
        LogError::CellRead { sheet, cell, .. } => LogError::CellRead {
            sheet,
            cell,
            context,
        },
        other => other,
    }
}
