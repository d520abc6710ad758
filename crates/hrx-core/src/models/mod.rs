//! Data models for records, rosters and configuration.

pub mod config;
pub mod record;
pub mod roster;

pub use config::{ExtractionConfig, HrxConfig, PdfConfig};
pub use record::{ExtractionMetadata, PeriodRecord, SourceType, Tenure};
pub use roster::{
    headcount_by_department, payroll_by_department, EmployeeEntry, RosterByDepartment,
};
