//! Report field extraction module.

pub mod builder;
pub mod fields;
mod parser;
pub mod roster;
pub mod rules;

pub use builder::{BuiltRecord, FieldStatus, FieldValue, RecordBuilder};
pub use fields::{normalize_line_breaks, FieldExtractor, RawFieldMap};
pub use parser::{ReportExtraction, ReportParser, RuleReportParser};
pub use roster::RosterExtractor;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
