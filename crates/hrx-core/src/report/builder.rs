//! Raw-field conversion and derived-metric computation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::fields::RawFieldMap;
use super::rules::{self, FieldKind, TargetType};
use crate::models::record::{PeriodRecord, Tenure};

/// A raw match converted to its catalog target type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Count(u32),
    Money(Decimal),
    Float(f64),
}

/// Conversion outcome for one catalog field.
///
/// Every catalog field resolves to exactly one status, so "found but
/// unconvertible" stays observable instead of collapsing into absence.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldStatus {
    /// Matched and converted.
    Valid(FieldValue),
    /// Matched but failed conversion; carries the raw text.
    Invalid(String),
    /// No pattern match in the document.
    Missing,
}

impl FieldStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldStatus::Valid(_))
    }
}

/// A built record plus the per-field conversion statuses behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRecord {
    /// The typed period record.
    pub record: PeriodRecord,
    /// Status of every catalog field, including the missing ones.
    pub statuses: BTreeMap<FieldKind, FieldStatus>,
}

impl BuiltRecord {
    /// Names of catalog fields with no match, in catalog-name order.
    pub fn missing_fields(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|(_, status)| matches!(status, FieldStatus::Missing))
            .map(|(kind, _)| kind.name().to_string())
            .collect()
    }

    /// Names of catalog fields that matched but failed conversion.
    pub fn invalid_fields(&self) -> Vec<String> {
        self.statuses
            .iter()
            .filter(|(_, status)| matches!(status, FieldStatus::Invalid(_)))
            .map(|(kind, _)| kind.name().to_string())
            .collect()
    }
}

/// Converts a raw field map into a typed period record.
///
/// Fields convert independently; one failure never aborts the others. A
/// derived metric is computed only when every input converted, and a zero
/// denominator yields a zero ratio rather than an error.
pub struct RecordBuilder;

impl RecordBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build a typed record for the given period from raw matches.
    pub fn build(&self, raw: &RawFieldMap, period_label: &str) -> BuiltRecord {
        let mut statuses = BTreeMap::new();

        for rule in rules::rules() {
            let status = match raw.get(&rule.kind) {
                None => FieldStatus::Missing,
                Some(value) => match convert(rule.target, value) {
                    Some(converted) => FieldStatus::Valid(converted),
                    None => {
                        warn!(
                            field = rule.kind.name(),
                            value = %value,
                            "matched value failed conversion"
                        );
                        FieldStatus::Invalid(value.clone())
                    }
                },
            };
            statuses.insert(rule.kind, status);
        }

        let mut record = PeriodRecord::new(period_label);
        record.terminations = count(&statuses, FieldKind::Terminations);
        record.average_headcount = count(&statuses, FieldKind::AverageHeadcount);
        record.hires = count(&statuses, FieldKind::Hires);
        record.dismissals_in_period = count(&statuses, FieldKind::DismissalsInPeriod);
        record.unexcused_absences = count(&statuses, FieldKind::UnexcusedAbsences);
        record.medical_certificates = count(&statuses, FieldKind::MedicalCertificates);
        record.eligible_workdays = count(&statuses, FieldKind::EligibleWorkdays);
        record.tenure_days = count(&statuses, FieldKind::TenureDays);
        record.overtime_value = money(&statuses, FieldKind::OvertimeValue);
        record.vacation_overdue = count(&statuses, FieldKind::VacationOverdue);
        record.vacation_scheduled = count(&statuses, FieldKind::VacationScheduled);
        record.mean_age = float(&statuses, FieldKind::MeanAge);
        record.min_age = count(&statuses, FieldKind::MinAge);
        record.max_age = count(&statuses, FieldKind::MaxAge);
        record.maternity_leaves = count(&statuses, FieldKind::MaternityLeaves);
        record.sick_leaves = count(&statuses, FieldKind::SickLeaves);
        record.accident_leaves = count(&statuses, FieldKind::AccidentLeaves);

        record.turnover = match (record.terminations, record.average_headcount) {
            (Some(terminations), Some(headcount)) => {
                Some(ratio(f64::from(terminations), headcount))
            }
            _ => None,
        };

        record.absenteeism = match (
            record.unexcused_absences,
            record.medical_certificates,
            record.eligible_workdays,
        ) {
            (Some(absences), Some(certificates), Some(workdays)) => {
                // Summed as f64: two u32 counts can exceed u32::MAX
                Some(ratio(f64::from(absences) + f64::from(certificates), workdays))
            }
            _ => None,
        };

        record.tenure = record.tenure_days.map(Tenure::from_days);

        debug!(
            period = period_label,
            missing = statuses.values().filter(|s| matches!(s, FieldStatus::Missing)).count(),
            invalid = statuses.values().filter(|s| matches!(s, FieldStatus::Invalid(_))).count(),
            "record built"
        );

        BuiltRecord { record, statuses }
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn convert(target: TargetType, value: &str) -> Option<FieldValue> {
    match target {
        TargetType::Count => rules::parse_br_count(value).map(FieldValue::Count),
        TargetType::Money => rules::parse_br_decimal(value).map(FieldValue::Money),
        TargetType::Float => rules::parse_br_float(value).map(FieldValue::Float),
    }
}

fn count(statuses: &BTreeMap<FieldKind, FieldStatus>, kind: FieldKind) -> Option<u32> {
    match statuses.get(&kind) {
        Some(FieldStatus::Valid(FieldValue::Count(n))) => Some(*n),
        _ => None,
    }
}

fn money(statuses: &BTreeMap<FieldKind, FieldStatus>, kind: FieldKind) -> Option<Decimal> {
    match statuses.get(&kind) {
        Some(FieldStatus::Valid(FieldValue::Money(amount))) => Some(*amount),
        _ => None,
    }
}

fn float(statuses: &BTreeMap<FieldKind, FieldStatus>, kind: FieldKind) -> Option<f64> {
    match statuses.get(&kind) {
        Some(FieldStatus::Valid(FieldValue::Float(value))) => Some(*value),
        _ => None,
    }
}

/// Ratio with the zero-denominator convention: no headcount means no churn
/// to measure, reported as zero rather than an error.
fn ratio(numerator: f64, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / f64::from(denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn build(pairs: &[(FieldKind, &str)]) -> BuiltRecord {
        let mut raw = RawFieldMap::new();
        for (kind, value) in pairs {
            raw.insert(*kind, value.to_string());
        }
        RecordBuilder::new().build(&raw, "Agosto/2025")
    }

    #[test]
    fn test_missing_field_stays_absent() {
        let built = build(&[(FieldKind::Hires, "1")]);

        assert_eq!(built.record.hires, Some(1));
        assert_eq!(built.record.terminations, None);
        assert_eq!(
            built.statuses.get(&FieldKind::Terminations),
            Some(&FieldStatus::Missing)
        );
    }

    #[test]
    fn test_invalid_field_keeps_raw_text() {
        let built = build(&[(FieldKind::Terminations, "1"), (FieldKind::MeanAge, ",,")]);

        assert_eq!(built.record.mean_age, None);
        assert_eq!(
            built.statuses.get(&FieldKind::MeanAge),
            Some(&FieldStatus::Invalid(",,".to_string()))
        );
        // The failure never aborts the other fields
        assert_eq!(built.record.terminations, Some(1));
    }

    #[test]
    fn test_turnover_needs_both_inputs() {
        let built = build(&[(FieldKind::Terminations, "1"), (FieldKind::AverageHeadcount, "38")]);
        let turnover = built.record.turnover.unwrap();
        assert!((turnover - 0.02632).abs() < 1e-4);

        let partial = build(&[(FieldKind::Terminations, "1")]);
        assert_eq!(partial.record.turnover, None);
    }

    #[test]
    fn test_turnover_zero_headcount_is_zero() {
        let built = build(&[(FieldKind::Terminations, "3"), (FieldKind::AverageHeadcount, "0")]);
        assert_eq!(built.record.turnover, Some(0.0));
    }

    #[test]
    fn test_absenteeism_needs_all_three_inputs() {
        let built = build(&[
            (FieldKind::UnexcusedAbsences, "0"),
            (FieldKind::MedicalCertificates, "12"),
            (FieldKind::EligibleWorkdays, "20"),
        ]);
        assert_eq!(built.record.absenteeism, Some(0.6));

        let partial = build(&[
            (FieldKind::UnexcusedAbsences, "0"),
            (FieldKind::MedicalCertificates, "12"),
        ]);
        assert_eq!(partial.record.absenteeism, None);
    }

    #[test]
    fn test_absenteeism_sum_of_extreme_counts_does_not_overflow() {
        // Two counts near u32::MAX still sum and divide cleanly
        let built = build(&[
            (FieldKind::UnexcusedAbsences, "4000000000"),
            (FieldKind::MedicalCertificates, "4000000000"),
            (FieldKind::EligibleWorkdays, "20"),
        ]);
        assert_eq!(built.record.absenteeism, Some(400_000_000.0));
    }

    #[test]
    fn test_tenure_breakdown() {
        let built = build(&[(FieldKind::TenureDays, "792")]);
        assert_eq!(built.record.tenure_days, Some(792));
        assert_eq!(built.record.tenure, Some(Tenure { years: 2, months: 2 }));
    }

    #[test]
    fn test_grouped_count_and_money_conversion() {
        let built = build(&[
            (FieldKind::TenureDays, "1.234"),
            (FieldKind::OvertimeValue, "3.673,62"),
        ]);
        assert_eq!(built.record.tenure_days, Some(1234));
        assert_eq!(
            built.record.overtime_value,
            Some(Decimal::from_str("3673.62").unwrap())
        );
    }

    #[test]
    fn test_invalid_derived_input_blocks_metric() {
        // Headcount matched but unconvertible counts as absent for turnover
        let built = build(&[
            (FieldKind::Terminations, "1"),
            (FieldKind::AverageHeadcount, "trinta e oito"),
        ]);
        assert_eq!(built.record.average_headcount, None);
        assert_eq!(built.record.turnover, None);
        assert_eq!(built.invalid_fields(), vec!["average_headcount"]);
    }

    #[test]
    fn test_field_name_lists() {
        let built = build(&[(FieldKind::Hires, "1")]);
        let missing = built.missing_fields();

        assert_eq!(missing.len(), 16);
        assert!(missing.contains(&"terminations".to_string()));
        assert!(!missing.contains(&"hires".to_string()));
        assert!(built.invalid_fields().is_empty());
    }
}
