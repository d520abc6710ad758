//! Core library for HR report extraction.
//!
//! This crate provides:
//! - PDF processing (text-layer decoding)
//! - Brazilian-Portuguese report field extraction (headcount, turnover
//!   inputs, absences, tenure, vacation balances, overtime)
//! - Departmental employee roster extraction
//! - Period record models with derived people-analytics metrics

pub mod error;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{HrxError, Result};
pub use models::config::HrxConfig;
pub use models::record::{ExtractionMetadata, PeriodRecord, SourceType, Tenure};
pub use models::roster::{EmployeeEntry, RosterByDepartment};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use report::{ReportExtraction, ReportParser, RuleReportParser};
