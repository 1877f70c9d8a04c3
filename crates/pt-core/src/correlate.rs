//! The correlation pass: pairs poop events with nearby food events.
//!
//! Every poop row is compared against every food row. A food within the
//! digestion window of a poop credits (or blames) the food and its whole
//! ingredient closure. O(n²) over the row count, which is fine for a
//! personal journal of at most a few thousand rows.

use chrono::Duration;

use crate::cupboard::Cupboard;
use crate::event::EventRow;

/// Maximum separation between a food and a poop for the food to count as
/// a candidate cause. The comparison is strict: exactly 24h apart does
/// not correlate.
pub const DIGESTION_WINDOW_HOURS: i64 = 24;

/// Tallies from one correlation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorrelationSummary {
    /// Poop rows processed.
    pub poops: usize,
    /// Food rows considered (ignore-listed labels excluded).
    pub foods: usize,
    /// Food/poop pairs that fell within the digestion window.
    pub correlations: usize,
}

/// Runs the correlation pass over validated rows, accumulating outcome
/// counters in the cupboard.
///
/// The window is symmetric: a food logged shortly *after* a poop still
/// counts, because same-day journal entries are often out of strict
/// order. That also means rows need not be sorted and no early break on
/// timestamp order is valid here.
pub fn correlate(rows: &[EventRow], cupboard: &mut Cupboard) -> CorrelationSummary {
    let window = Duration::hours(DIGESTION_WINDOW_HOURS);
    let mut summary = CorrelationSummary::default();

    for row in rows {
        // The category already carries the polarity, so there is no
        // fallible poop conversion to discard here.
        let Some(polarity) = row.category.polarity() else {
            if !cupboard.is_ignored(&row.label) {
                summary.foods += 1;
            }
            continue;
        };
        summary.poops += 1;

        for food in rows {
            if food.category.is_poop() || cupboard.is_ignored(&food.label) {
                continue;
            }
            if (row.timestamp - food.timestamp).abs() < window {
                cupboard.record(&food.label, polarity);
                summary.correlations += 1;
            }
        }
    }

    tracing::debug!(
        poops = summary.poops,
        foods = summary.foods,
        correlations = summary.correlations,
        "correlation pass complete"
    );
    summary
}
