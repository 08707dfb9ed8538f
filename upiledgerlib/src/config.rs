//! Extraction tunables for the statement layout.

use crate::error::{LedgerError, Result};

/// Glyphs whose baselines differ by at most this many units share a line.
pub const DEFAULT_Y_TOLERANCE: f64 = 3.0;

/// A horizontal gap strictly larger than this many units becomes a space.
pub const DEFAULT_GAP_THRESHOLD: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractConfig {
    pub y_tolerance: f64,
    pub gap_threshold: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            y_tolerance: DEFAULT_Y_TOLERANCE,
            gap_threshold: DEFAULT_GAP_THRESHOLD,
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<()> {
        check("y_tolerance", self.y_tolerance)?;
        check("gap_threshold", self.gap_threshold)
    }
}

fn check(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LedgerError::Config(format!(
            "{name} must be a finite, non-negative number (got {value})"
        )));
    }
    Ok(())
}
