//! Core domain logic for Potty Trainer.
//!
//! This crate contains the types and logic for:
//! - Event rows: parsing, normalization, and food/poop classification
//! - The cupboard: food canonicalization and ingredient decomposition
//! - Correlation: pairing foods with outcomes inside the digestion window
//! - Reporting: ranking foods by quality and rendering the table

pub mod correlate;
pub mod cupboard;
pub mod event;
pub mod report;

pub use correlate::{CorrelationSummary, DIGESTION_WINDOW_HOURS, correlate};
pub use cupboard::{Cupboard, Food, Tables};
pub use event::{Category, Cell, EventRow, Polarity, Poop, RowError};
pub use report::{CONFIDENCE_THRESHOLD, ReportError, render};
