//! Ranking and fixed-width rendering of correlation results.

use std::fmt::Write;

use crate::cupboard::{Cupboard, Food};

/// Minimum confidence for a food to appear in the report. Low-sample
/// foods are suppressed as statistically unreliable.
pub const CONFIDENCE_THRESHOLD: f64 = 0.9;

/// Errors from report rendering.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The cupboard is empty, so there is nothing to rank.
    #[error("no food events recorded; nothing to report")]
    NoData,
}

/// Renders the report table: eligible foods sorted worst-first, with
/// quality and confidence to two decimal places. The name column is as
/// wide as the longest eligible name.
pub fn render(cupboard: &Cupboard) -> Result<String, ReportError> {
    if cupboard.is_empty() {
        return Err(ReportError::NoData);
    }

    let mut eligible: Vec<&Food> = cupboard
        .foods()
        .filter(|food| food.confidence() >= CONFIDENCE_THRESHOLD)
        .collect();
    eligible.sort_by(|a, b| {
        a.quality()
            .total_cmp(&b.quality())
            .then_with(|| a.name.cmp(&b.name))
    });

    let width = eligible
        .iter()
        .map(|food| food.name.len())
        .chain(std::iter::once("food".len()))
        .max()
        .unwrap_or_default();

    let mut output = String::new();
    writeln!(output, "{:<width$} | {:>7} | {:>10}", "food", "quality", "confidence").unwrap();

    if eligible.is_empty() {
        writeln!(output, "(no foods above confidence threshold)").unwrap();
        return Ok(output);
    }

    for food in eligible {
        writeln!(
            output,
            "{:<width$} | {:>7.2} | {:>10.2}",
            food.name,
            food.quality(),
            food.confidence()
        )
        .unwrap();
    }

    Ok(output)
}
