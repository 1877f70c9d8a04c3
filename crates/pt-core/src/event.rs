//! Journal rows: parsing, normalization, and classification.
//!
//! A journal row is a timestamp cell and a free-text label cell. Labels
//! equal to "good poop" or "bad poop" classify the row as an outcome;
//! every other non-empty label is a food.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};

/// Label that marks a good outcome.
pub const GOOD_POOP: &str = "good poop";

/// Label that marks a bad outcome.
pub const BAD_POOP: &str = "bad poop";

/// A typed view of one spreadsheet cell.
///
/// Sources that carry native datetime values (e.g. a spreadsheet export
/// that preserves cell types) use `Timestamp`; plain-text sources use
/// `Text` and let row construction do the parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A native datetime value with an explicit zone offset.
    Timestamp(DateTime<FixedOffset>),
    /// A text value, possibly an ISO-8601 timestamp.
    Text(String),
    /// A missing or blank cell.
    Empty,
}

impl Cell {
    fn describe(&self) -> String {
        match self {
            Self::Timestamp(dt) => format!("datetime {dt}"),
            Self::Text(text) => format!("text {text:?}"),
            Self::Empty => "empty cell".to_string(),
        }
    }
}

/// Errors from row construction and conversion.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// The row has no usable timestamp. Callers skip the row rather than
    /// aborting the run.
    #[error("row has no usable timestamp")]
    MissingTimestamp,

    /// The label cell does not hold usable text. This indicates a
    /// structurally broken source and is fatal.
    #[error("invalid event label: {0}")]
    InvalidEventLabel(String),

    /// A row was converted to a poop despite not being classified as one.
    #[error("invalid poop type: {0:?}")]
    InvalidPoopType(String),
}

/// How a row's label classifies it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Food,
    PoopGood,
    PoopBad,
}

impl Category {
    /// Returns true for either poop polarity.
    pub const fn is_poop(self) -> bool {
        matches!(self, Self::PoopGood | Self::PoopBad)
    }

    /// The outcome polarity, or `None` for food rows.
    pub const fn polarity(self) -> Option<Polarity> {
        match self {
            Self::PoopGood => Some(Polarity::Good),
            Self::PoopBad => Some(Polarity::Bad),
            Self::Food => None,
        }
    }
}

/// Outcome polarity of a poop event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Good,
    Bad,
}

/// A poop event derived from an [`EventRow`]. Carries only the instant
/// and the polarity; never persisted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poop {
    pub at: DateTime<Utc>,
    pub polarity: Polarity,
}

/// One validated journal entry. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// Normalized label: trimmed, lowercased, non-empty.
    pub label: String,
    /// Classification derived from the label.
    pub category: Category,
}

impl EventRow {
    /// Builds a row from its timestamp and label cells.
    ///
    /// Callers are expected to drop rows with an empty label cell before
    /// construction; an empty or non-text label here is
    /// [`RowError::InvalidEventLabel`]. A missing or unparseable timestamp
    /// is [`RowError::MissingTimestamp`], which callers treat as "skip
    /// this row".
    pub fn from_cells(timestamp: &Cell, label: &Cell) -> Result<Self, RowError> {
        let label = match label {
            Cell::Text(text) => text.trim().to_lowercase(),
            other => return Err(RowError::InvalidEventLabel(other.describe())),
        };
        if label.is_empty() {
            return Err(RowError::InvalidEventLabel("blank text".to_string()));
        }

        let timestamp = match timestamp {
            Cell::Timestamp(dt) => dt.with_timezone(&Utc),
            Cell::Text(text) => parse_timestamp(text).ok_or(RowError::MissingTimestamp)?,
            Cell::Empty => return Err(RowError::MissingTimestamp),
        };

        let category = match label.as_str() {
            GOOD_POOP => Category::PoopGood,
            BAD_POOP => Category::PoopBad,
            _ => Category::Food,
        };

        Ok(Self {
            timestamp,
            label,
            category,
        })
    }

    /// Views the row as a poop event.
    ///
    /// Unreachable for food rows through normal classification; calling it
    /// on one is [`RowError::InvalidPoopType`].
    pub fn to_poop(&self) -> Result<Poop, RowError> {
        let polarity = self
            .category
            .polarity()
            .ok_or_else(|| RowError::InvalidPoopType(self.label.clone()))?;
        Ok(Poop {
            at: self.timestamp,
            polarity,
        })
    }
}

/// The journal's recording locale (US Pacific, UTC-8), attached to any
/// timestamp that carries no zone of its own.
fn journal_tz() -> FixedOffset {
    FixedOffset::west_opt(8 * 3600).unwrap()
}

/// Parses an ISO-8601-ish timestamp string.
///
/// Zone-aware strings keep their offset; zone-less strings get UTC-8
/// attached before conversion, so window comparisons always operate on
/// consistent instants.
fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    for format in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return attach_journal_tz(naive);
        }
    }

    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    attach_journal_tz(date.and_hms_opt(0, 0, 0)?)
}

fn attach_journal_tz(naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    naive
        .and_local_timezone(journal_tz())
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn text(value: &str) -> Cell {
        Cell::Text(value.to_string())
    }

    #[test]
    fn label_is_trimmed_and_lowercased() {
        let row = EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &text("  Coffee ")).unwrap();
        assert_eq!(row.label, "coffee");
        assert_eq!(row.category, Category::Food);
    }

    #[test]
    fn poop_labels_classify_by_polarity() {
        let good = EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &text("Good Poop")).unwrap();
        assert_eq!(good.category, Category::PoopGood);

        let bad = EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &text("bad poop")).unwrap();
        assert_eq!(bad.category, Category::PoopBad);
    }

    #[test]
    fn zoneless_timestamp_gets_utc_minus_8() {
        let row = EventRow::from_cells(&text("2025-01-01T08:00:00"), &text("coffee")).unwrap();
        // 08:00 at UTC-8 is 16:00 UTC
        assert_eq!(
            row.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn zoned_timestamp_keeps_its_offset() {
        let row = EventRow::from_cells(&text("2025-01-01T08:00:00+02:00"), &text("coffee")).unwrap();
        assert_eq!(
            row.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn date_only_timestamp_is_midnight_local() {
        let row = EventRow::from_cells(&text("2025-01-01"), &text("coffee")).unwrap();
        assert_eq!(
            row.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn native_timestamp_cell_is_used_as_is() {
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let row = EventRow::from_cells(&Cell::Timestamp(dt), &text("coffee")).unwrap();
        assert_eq!(
            row.timestamp,
            Utc.with_ymd_and_hms(2025, 1, 1, 16, 0, 0).unwrap()
        );
    }

    #[test]
    fn missing_or_garbage_timestamp_is_skippable() {
        let err = EventRow::from_cells(&Cell::Empty, &text("coffee")).unwrap_err();
        assert!(matches!(err, RowError::MissingTimestamp));

        let err = EventRow::from_cells(&text("not a date"), &text("coffee")).unwrap_err();
        assert!(matches!(err, RowError::MissingTimestamp));
    }

    #[test]
    fn non_text_label_is_invalid() {
        let offset = FixedOffset::west_opt(8 * 3600).unwrap();
        let dt = offset.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
        let err =
            EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &Cell::Timestamp(dt)).unwrap_err();
        assert!(matches!(err, RowError::InvalidEventLabel(_)));
    }

    #[test]
    fn polarity_follows_category() {
        assert_eq!(Category::PoopGood.polarity(), Some(Polarity::Good));
        assert_eq!(Category::PoopBad.polarity(), Some(Polarity::Bad));
        assert_eq!(Category::Food.polarity(), None);
    }

    #[test]
    fn to_poop_on_food_row_is_invalid() {
        let row = EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &text("coffee")).unwrap();
        let err = row.to_poop().unwrap_err();
        assert!(matches!(err, RowError::InvalidPoopType(_)));
    }

    #[test]
    fn to_poop_carries_timestamp_and_polarity() {
        let row = EventRow::from_cells(&text("2025-01-01T08:00:00Z"), &text("bad poop")).unwrap();
        let poop = row.to_poop().unwrap();
        assert_eq!(poop.polarity, Polarity::Bad);
        assert_eq!(poop.at, row.timestamp);
    }
}
