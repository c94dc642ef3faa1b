//! Register-coverage matrix: a 16x16 grid of coverage percentages, one cell
//! per 8-bit register address. Row = high nibble, column = low nibble, so
//! address 0xA3 lives at `cells[10][3]`. Storage is never flipped; any
//! vertical flip for display happens in the render layer only.

use serde_json::Value;

use crate::fixture;

/// Cells per axis.
pub const DIM: usize = 16;
/// Total addressable cells (0x00..=0xFF).
pub const CELL_COUNT: usize = DIM * DIM;

/// Externally supplied coverage data has the wrong shape or content.
/// The loader recovers from this by substituting the demo fixture; it is
/// never surfaced to dashboard callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    WrongRowCount(usize),
    WrongRowLength { row: usize, len: usize },
    WrongFlatLength(usize),
    NonNumericCell { row: usize, col: usize },
    UnexpectedShape,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatError::WrongRowCount(n) => write!(f, "expected 16 rows, got {}", n),
            FormatError::WrongRowLength { row, len } => {
                write!(f, "row {} has {} columns, expected 16", row, len)
            }
            FormatError::WrongFlatLength(n) => {
                write!(f, "flat matrix has {} values, expected 256", n)
            }
            FormatError::NonNumericCell { row, col } => {
                write!(f, "non-numeric cell at row {} col {}", row, col)
            }
            FormatError::UnexpectedShape => write!(f, "unrecognized matrix JSON shape"),
        }
    }
}

impl std::error::Error for FormatError {}

/// A nibble query fell outside [0, 15]. This is a caller bug at the query
/// boundary and is surfaced, never swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeError {
    pub high: u8,
    pub low: u8,
}

impl std::fmt::Display for RangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "nibble out of range: high={} low={} (both must be <= 15)",
            self.high, self.low
        )
    }
}

impl std::error::Error for RangeError {}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterCoverageMatrix {
    cells: [[f64; DIM]; DIM],
}

impl RegisterCoverageMatrix {
    /// Build from a nested grid. Must be exactly 16 rows of 16 values.
    pub fn from_grid(rows: &[Vec<f64>]) -> Result<Self, FormatError> {
        if rows.len() != DIM {
            return Err(FormatError::WrongRowCount(rows.len()));
        }
        let mut cells = [[0.0; DIM]; DIM];
        for (r, row) in rows.iter().enumerate() {
            if row.len() != DIM {
                return Err(FormatError::WrongRowLength { row: r, len: row.len() });
            }
            cells[r].copy_from_slice(row);
        }
        Ok(Self { cells })
    }

    /// Build from a flat 256-value sequence, reshaped row-major:
    /// `flat[16*high + low]` becomes the cell for address `(high << 4) | low`.
    pub fn from_flat(flat: &[f64]) -> Result<Self, FormatError> {
        if flat.len() != CELL_COUNT {
            return Err(FormatError::WrongFlatLength(flat.len()));
        }
        let mut cells = [[0.0; DIM]; DIM];
        for (i, v) in flat.iter().enumerate() {
            cells[i / DIM][i % DIM] = *v;
        }
        Ok(Self { cells })
    }

    /// Build from the artifact JSON: either `{"matrix": <...>}` or a bare
    /// array, where the payload is a nested 16x16 grid or a flat 256-element
    /// sequence of numbers.
    pub fn from_json(value: &Value) -> Result<Self, FormatError> {
        let payload = match value {
            Value::Object(map) => map.get("matrix").ok_or(FormatError::UnexpectedShape)?,
            Value::Array(_) => value,
            _ => return Err(FormatError::UnexpectedShape),
        };
        let outer = payload.as_array().ok_or(FormatError::UnexpectedShape)?;
        if outer.iter().all(|v| v.is_array()) && !outer.is_empty() {
            let mut rows = Vec::with_capacity(outer.len());
            for (r, row) in outer.iter().enumerate() {
                let row = row.as_array().ok_or(FormatError::UnexpectedShape)?;
                let mut parsed = Vec::with_capacity(row.len());
                for (c, cell) in row.iter().enumerate() {
                    parsed.push(
                        cell.as_f64()
                            .ok_or(FormatError::NonNumericCell { row: r, col: c })?,
                    );
                }
                rows.push(parsed);
            }
            Self::from_grid(&rows)
        } else {
            let mut flat = Vec::with_capacity(outer.len());
            for (i, cell) in outer.iter().enumerate() {
                flat.push(cell.as_f64().ok_or(FormatError::NonNumericCell {
                    row: i / DIM,
                    col: i % DIM,
                })?);
            }
            Self::from_flat(&flat)
        }
    }

    /// Deterministic demo fixture (seed 42). Same matrix on every call.
    pub fn demo() -> Self {
        Self { cells: fixture::demo_matrix_cells() }
    }

    pub(crate) fn from_cells(cells: [[f64; DIM]; DIM]) -> Self {
        Self { cells }
    }

    /// Coverage at (high nibble, low nibble). Both must be in [0, 15].
    pub fn value_at(&self, high: u8, low: u8) -> Result<f64, RangeError> {
        if high as usize >= DIM || low as usize >= DIM {
            return Err(RangeError { high, low });
        }
        Ok(self.cells[high as usize][low as usize])
    }

    /// Coverage for a full address byte: 0xA3 -> row 0xA, column 0x3.
    pub fn value_at_address(&self, address: u8) -> f64 {
        self.cells[(address >> 4) as usize][(address & 0xF) as usize]
    }

    /// Cells strictly below `threshold`, as (address byte, value) pairs in
    /// row-major order (high nibble ascending, then low nibble). The
    /// iterator is restartable: each call scans from 0x00 again.
    pub fn cells_below_threshold(&self, threshold: f64) -> CellsBelowThreshold<'_> {
        CellsBelowThreshold { matrix: self, next: 0, threshold }
    }

    /// Mean/median/min/max over all 256 cells, plus the address of the
    /// minimum (first occurrence in row-major order on ties).
    pub fn summary(&self) -> MatrixSummary {
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut min_address = 0u8;
        let mut sorted = [0.0; CELL_COUNT];
        for i in 0..CELL_COUNT {
            let v = self.cells[i / DIM][i % DIM];
            sum += v;
            if v > max {
                max = v;
            }
            if v < min {
                min = v;
                min_address = i as u8;
            }
            sorted[i] = v;
        }
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median = (sorted[CELL_COUNT / 2 - 1] + sorted[CELL_COUNT / 2]) / 2.0;
        MatrixSummary {
            mean: sum / CELL_COUNT as f64,
            median,
            min,
            max,
            min_address,
        }
    }

    /// Raw grid, row = high nibble. The render layer decides orientation.
    pub fn rows(&self) -> &[[f64; DIM]; DIM] {
        &self.cells
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixSummary {
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub min_address: u8,
}

pub struct CellsBelowThreshold<'a> {
    matrix: &'a RegisterCoverageMatrix,
    next: usize,
    threshold: f64,
}

impl Iterator for CellsBelowThreshold<'_> {
    type Item = (u8, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < CELL_COUNT {
            let i = self.next;
            self.next += 1;
            let v = self.matrix.cells[i / DIM][i % DIM];
            if v < self.threshold {
                return Some((i as u8, v));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn grid_with(value: f64) -> Vec<Vec<f64>> {
        vec![vec![value; DIM]; DIM]
    }

    #[test]
    fn grid_addressing_matches_storage() {
        let mut rows = grid_with(0.0);
        for h in 0..DIM {
            for l in 0..DIM {
                rows[h][l] = (h * DIM + l) as f64;
            }
        }
        let m = RegisterCoverageMatrix::from_grid(&rows).unwrap();
        for h in 0..DIM as u8 {
            for l in 0..DIM as u8 {
                assert_eq!(m.value_at(h, l).unwrap(), rows[h as usize][l as usize]);
            }
        }
    }

    #[test]
    fn flat_reshape_is_row_major() {
        let flat: Vec<f64> = (0..CELL_COUNT).map(|i| i as f64).collect();
        let m = RegisterCoverageMatrix::from_flat(&flat).unwrap();
        for h in 0..DIM as u8 {
            for l in 0..DIM as u8 {
                assert_eq!(m.value_at(h, l).unwrap(), flat[DIM * h as usize + l as usize]);
            }
        }
    }

    #[test]
    fn wrong_shapes_are_format_errors() {
        assert_eq!(
            RegisterCoverageMatrix::from_flat(&vec![1.0; 200]),
            Err(FormatError::WrongFlatLength(200))
        );
        assert_eq!(
            RegisterCoverageMatrix::from_grid(&vec![vec![1.0; DIM]; 15]),
            Err(FormatError::WrongRowCount(15))
        );
        let mut ragged = grid_with(1.0);
        ragged[7].pop();
        assert_eq!(
            RegisterCoverageMatrix::from_grid(&ragged),
            Err(FormatError::WrongRowLength { row: 7, len: 15 })
        );
    }

    #[test]
    fn json_wrapper_and_bare_forms() {
        let flat: Vec<f64> = (0..CELL_COUNT).map(|i| i as f64).collect();
        let wrapped = json!({ "matrix": flat.clone() });
        let bare = json!(flat);
        let a = RegisterCoverageMatrix::from_json(&wrapped).unwrap();
        let b = RegisterCoverageMatrix::from_json(&bare).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.value_at_address(0xA3), (0xA3 as usize) as f64);
    }

    #[test]
    fn json_non_numeric_rejected() {
        let rows = grid_with(90.0);
        let mut v = serde_json::to_value(&rows).unwrap();
        v[2][3] = json!("oops");
        assert_eq!(
            RegisterCoverageMatrix::from_json(&v),
            Err(FormatError::NonNumericCell { row: 2, col: 3 })
        );
        assert_eq!(
            RegisterCoverageMatrix::from_json(&json!("not a matrix")),
            Err(FormatError::UnexpectedShape)
        );
        assert_eq!(
            RegisterCoverageMatrix::from_json(&json!({ "other": [] })),
            Err(FormatError::UnexpectedShape)
        );
    }

    #[test]
    fn address_decomposition() {
        let flat: Vec<f64> = (0..CELL_COUNT).map(|i| i as f64).collect();
        let m = RegisterCoverageMatrix::from_flat(&flat).unwrap();
        assert_eq!(m.value_at_address(0xA3), m.value_at(10, 3).unwrap());
        assert_eq!(m.value_at_address(0x00), m.value_at(0, 0).unwrap());
        assert_eq!(m.value_at_address(0xFF), m.value_at(15, 15).unwrap());
    }

    #[test]
    fn out_of_range_query_is_error() {
        let m = RegisterCoverageMatrix::from_grid(&grid_with(50.0)).unwrap();
        assert_eq!(m.value_at(16, 0), Err(RangeError { high: 16, low: 0 }));
        assert_eq!(m.value_at(0, 16), Err(RangeError { high: 0, low: 16 }));
        assert_eq!(m.value_at(255, 255), Err(RangeError { high: 255, low: 255 }));
        assert!(m.value_at(15, 15).is_ok());
    }

    #[test]
    fn threshold_scan_row_major_and_restartable() {
        let mut rows = grid_with(100.0);
        rows[0][5] = 10.0;
        rows[3][12] = 20.0;
        rows[10][10] = 30.0;
        let m = RegisterCoverageMatrix::from_grid(&rows).unwrap();
        let hits: Vec<(u8, f64)> = m.cells_below_threshold(70.0).collect();
        assert_eq!(hits, vec![(0x05, 10.0), (0x3C, 20.0), (0xAA, 30.0)]);
        // Restart from scratch.
        let again: Vec<(u8, f64)> = m.cells_below_threshold(70.0).collect();
        assert_eq!(hits, again);
        // Strictly-below: a cell exactly at the threshold is excluded.
        assert_eq!(m.cells_below_threshold(10.0).count(), 0);
    }

    #[test]
    fn summary_all_equal() {
        let m = RegisterCoverageMatrix::from_grid(&grid_with(100.0)).unwrap();
        let s = m.summary();
        assert_eq!(s.mean, 100.0);
        assert_eq!(s.median, 100.0);
        assert_eq!(s.min, 100.0);
        assert_eq!(s.max, 100.0);
    }

    #[test]
    fn summary_min_address_first_in_row_major() {
        let mut rows = grid_with(100.0);
        rows[4][2] = 0.0;
        let m = RegisterCoverageMatrix::from_grid(&rows).unwrap();
        let s = m.summary();
        assert_eq!(s.min, 0.0);
        assert_eq!(s.min_address, 0x42);

        // Tie: the earlier row-major address wins.
        let mut rows = grid_with(100.0);
        rows[4][2] = 5.0;
        rows[9][9] = 5.0;
        let m = RegisterCoverageMatrix::from_grid(&rows).unwrap();
        assert_eq!(m.summary().min_address, 0x42);
    }
}
