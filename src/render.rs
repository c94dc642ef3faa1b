//! View models for the rendering shell. The vertical flip of the heatmap
//! (0xF row on top) lives here and nowhere else: matrix storage and queries
//! always keep row 0 = high nibble 0x0. A chart library consuming
//! `HeatmapView` gets display-ready rows and labels and never needs to know
//! about the flip.

use crate::matrix::{RegisterCoverageMatrix, DIM};

/// Display-ready heatmap: `grid[0]` is the 0xF row, x labels run 0x0..0xF
/// left to right, y labels run 0xF..0x0 top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapView {
    pub grid: Vec<[f64; DIM]>,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

impl HeatmapView {
    pub fn new(matrix: &RegisterCoverageMatrix) -> Self {
        let grid: Vec<[f64; DIM]> = matrix.rows().iter().rev().copied().collect();
        let x_labels = (0..DIM).map(|l| format!("0x{:X}", l)).collect();
        let y_labels = (0..DIM).rev().map(|h| format!("0x{:X}", h)).collect();
        Self { grid, x_labels, y_labels }
    }

    /// Hover text for a display cell: full address plus coverage.
    pub fn hover_text(&self, display_row: usize, col: usize) -> String {
        let high = DIM - 1 - display_row;
        format!("Address 0x{:X}{:X}: {:.1}%", high, col, self.grid[display_row][col])
    }
}

/// Coverage quality bands used by the legend and the address lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageBand {
    Excellent,
    Good,
    Fair,
    Attention,
    Poor,
    Critical,
}

impl CoverageBand {
    pub fn from_value(coverage: f64) -> Self {
        if coverage >= 90.0 {
            CoverageBand::Excellent
        } else if coverage >= 80.0 {
            CoverageBand::Good
        } else if coverage >= 70.0 {
            CoverageBand::Fair
        } else if coverage >= 60.0 {
            CoverageBand::Attention
        } else if coverage >= 40.0 {
            CoverageBand::Poor
        } else {
            CoverageBand::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverageBand::Excellent => "excellent",
            CoverageBand::Good => "good",
            CoverageBand::Fair => "fair",
            CoverageBand::Attention => "needs attention",
            CoverageBand::Poor => "poor",
            CoverageBand::Critical => "critical",
        }
    }
}

/// `0xA3`-style formatting for an address byte.
pub fn format_address(address: u8) -> String {
    format!("0x{:02X}", address)
}

/// Parse a two-hex-digit address from the lookup box ("A3", "0xA3", "a3").
/// Errors surface to the caller; bad lookup input is not a data-quality
/// issue and is never silently swallowed.
pub fn parse_address(input: &str) -> Result<u8, String> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")).unwrap_or(trimmed);
    if digits.len() != 2 {
        return Err(format!("expected two hex digits, got {:?}", trimmed));
    }
    u8::from_str_radix(digits, 16).map_err(|_| format!("invalid hex address {:?}", trimmed))
}
