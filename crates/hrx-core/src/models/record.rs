//! Period record data model for extracted people-analytics metrics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Metrics extracted from one report, keyed by a reporting period.
///
/// Every attribute is independently optional: a field the document does not
/// report stays `None` instead of being defaulted to zero, so "not reported"
/// and "reported as zero" remain distinguishable. Derived attributes
/// (turnover, absenteeism, tenure breakdown) are present only when their full
/// input set was extracted and converted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Reporting period label, supplied by the caller (e.g. "Agosto/2025").
    /// Never derived from the document text.
    pub period_label: String,

    /// Terminations used as the turnover numerator (desligamentos).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terminations: Option<u32>,

    /// Average headcount over the period (média de colaboradores).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_headcount: Option<u32>,

    /// Turnover ratio: terminations / average headcount. Zero when the
    /// headcount denominator is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover: Option<f64>,

    /// Hires in the period (admissões).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hires: Option<u32>,

    /// Dismissals reported for the period itself (demissões no período),
    /// distinct from the turnover input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dismissals_in_period: Option<u32>,

    /// Unexcused absences (faltas injustificadas).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unexcused_absences: Option<u32>,

    /// Medical certificates presented (atestados médicos).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_certificates: Option<u32>,

    /// Eligible workdays in the period (dias úteis).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_workdays: Option<u32>,

    /// Absenteeism ratio: (absences + certificates) / eligible workdays.
    /// Zero when the workday denominator is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absenteeism: Option<f64>,

    /// Average tenure in days (tempo médio de casa).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure_days: Option<u32>,

    /// Tenure broken into whole years and remainder months.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenure: Option<Tenure>,

    /// Monetary value of overtime paid in the period (valor de horas extras).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_value: Option<Decimal>,

    /// Vacation days overdue (férias vencidas).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_overdue: Option<u32>,

    /// Vacation days already scheduled (férias programadas).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vacation_scheduled: Option<u32>,

    /// Mean employee age (idade média).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_age: Option<f64>,

    /// Youngest employee age (idade mínima).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u32>,

    /// Oldest employee age (idade máxima).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u32>,

    /// Maternity leaves in the period (licenças maternidade).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maternity_leaves: Option<u32>,

    /// Sick leaves in the period (licenças por doença).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sick_leaves: Option<u32>,

    /// Work-accident leaves in the period (licenças por acidente).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accident_leaves: Option<u32>,
}

impl PeriodRecord {
    /// Create an empty record for the given period label.
    pub fn new(period_label: impl Into<String>) -> Self {
        Self {
            period_label: period_label.into(),
            ..Self::default()
        }
    }

    /// True when no metric field (extracted or derived) is present.
    pub fn is_empty(&self) -> bool {
        self.terminations.is_none()
            && self.average_headcount.is_none()
            && self.turnover.is_none()
            && self.hires.is_none()
            && self.dismissals_in_period.is_none()
            && self.unexcused_absences.is_none()
            && self.medical_certificates.is_none()
            && self.eligible_workdays.is_none()
            && self.absenteeism.is_none()
            && self.tenure_days.is_none()
            && self.tenure.is_none()
            && self.overtime_value.is_none()
            && self.vacation_overdue.is_none()
            && self.vacation_scheduled.is_none()
            && self.mean_age.is_none()
            && self.min_age.is_none()
            && self.max_age.is_none()
            && self.maternity_leaves.is_none()
            && self.sick_leaves.is_none()
            && self.accident_leaves.is_none()
    }

    /// Scan the record for data-quality oddities and return any issues found.
    ///
    /// These are diagnostics, not failures: a record with issues is still a
    /// valid extraction result.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.is_empty() {
            issues.push("no metric fields were extracted".to_string());
        }

        if let Some(turnover) = self.turnover {
            if turnover > 1.0 {
                issues.push(format!(
                    "turnover {:.4} above 1.0: terminations exceed average headcount",
                    turnover
                ));
            }
        }

        if let Some(absenteeism) = self.absenteeism {
            if absenteeism > 1.0 {
                issues.push(format!(
                    "absenteeism {:.4} above 1.0: absences exceed eligible workdays",
                    absenteeism
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            if min > max {
                issues.push(format!("minimum age {} above maximum age {}", min, max));
            }
        }

        issues
    }
}

/// Tenure expressed as whole years plus remainder months.
///
/// Uses the fixed 365-day year / 30-day month approximation carried over
/// from the source reports, not calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenure {
    /// Whole years: days / 365.
    pub years: u32,
    /// Remainder months: (days % 365) / 30.
    pub months: u32,
}

impl Tenure {
    /// Break a day count into years and months.
    pub fn from_days(days: u32) -> Self {
        Self {
            years: days / 365,
            months: (days % 365) / 30,
        }
    }
}

/// Source document type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Plain text handed to the parser directly.
    PlainText,
    /// Text decoded from a PDF report.
    Pdf,
    /// Unknown source.
    #[default]
    Unknown,
}

/// Metadata about the extraction process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Source document type.
    pub source_type: SourceType,

    /// Processing time in milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,

    /// Warnings encountered during extraction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    /// Catalog fields with no pattern match in the document.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,

    /// Catalog fields that matched but failed conversion.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid_fields: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tenure_from_days() {
        assert_eq!(Tenure::from_days(792), Tenure { years: 2, months: 2 });
        assert_eq!(Tenure::from_days(365), Tenure { years: 1, months: 0 });
        assert_eq!(Tenure::from_days(0), Tenure { years: 0, months: 0 });
        // 364 leftover days divide into 12 approximate months.
        assert_eq!(Tenure::from_days(364), Tenure { years: 0, months: 12 });
    }

    #[test]
    fn test_absent_fields_stay_out_of_json() {
        let mut record = PeriodRecord::new("Agosto/2025");
        record.hires = Some(1);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"hires\":1"));
        assert!(!json.contains("terminations"));
        assert!(!json.contains("turnover"));
    }

    #[test]
    fn test_record_round_trip() {
        let mut record = PeriodRecord::new("Agosto/2025");
        record.terminations = Some(1);
        record.average_headcount = Some(38);
        record.turnover = Some(1.0 / 38.0);
        record.tenure_days = Some(792);
        record.tenure = Some(Tenure::from_days(792));

        let json = serde_json::to_string(&record).unwrap();
        let back: PeriodRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_validate_flags_inverted_ages() {
        let mut record = PeriodRecord::new("Julho/2025");
        record.min_age = Some(60);
        record.max_age = Some(22);

        let issues = record.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("minimum age 60"));
    }

    #[test]
    fn test_validate_empty_record() {
        let record = PeriodRecord::new("Julho/2025");
        assert!(record.is_empty());
        assert_eq!(record.validate(), vec!["no metric fields were extracted"]);
    }

    #[test]
    fn test_validate_high_turnover() {
        let mut record = PeriodRecord::new("Julho/2025");
        record.turnover = Some(1.5);

        let issues = record.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].contains("turnover"));
    }
}
