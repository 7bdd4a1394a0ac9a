use crate::grid::coordinate;

/// Addressing for one protection hour.
///
/// `current_hour` is zero-based and keys the parser's records; `sim_row` is
/// the 1-based sheet row holding the hour, below the header rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourIndex {
    pub current_hour: usize,
    pub sim_row: usize,
}

impl HourIndex {
    /// `hour` is 1-based.
    pub fn for_hour(hour: usize, header_rows: usize) -> Self {
        Self {
            current_hour: hour.saturating_sub(1),
            sim_row: hour + header_rows,
        }
    }

    /// The hour as printed in the log.
    pub fn hour(&self) -> usize {
        self.current_hour + 1
    }

    /// Coordinate of `column` on this hour's row.
    pub fn cell(&self, column: &str) -> String {
        coordinate(column, self.sim_row)
    }

    /// Coordinate of `column` on the previous hour's row.
    pub fn previous_cell(&self, column: &str) -> String {
        coordinate(column, self.sim_row - 1)
    }
}
