//! Rule-based report parser.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{ExtractionMetadata, PeriodRecord, SourceType};
use crate::models::roster::RosterByDepartment;

use super::builder::RecordBuilder;
use super::fields::FieldExtractor;
use super::roster::RosterExtractor;
use super::Result;

/// Result of parsing one report document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportExtraction {
    /// Typed period record with derived metrics.
    pub record: PeriodRecord,
    /// Employee roster grouped by department.
    pub roster: RosterByDepartment,
    /// Extraction metadata.
    pub metadata: ExtractionMetadata,
}

/// Trait for report parsing.
pub trait ReportParser {
    /// Parse a report from text, keying the record by the given period label.
    fn parse(&self, text: &str, period_label: &str) -> Result<ReportExtraction>;
}

/// Rule-based parser running the field catalog and the roster extractor.
///
/// Stateless across calls; one instance can parse any number of documents
/// and callers may run instances in parallel.
pub struct RuleReportParser {
    extractor: FieldExtractor,
    builder: RecordBuilder,
    roster: RosterExtractor,
}

impl RuleReportParser {
    /// Create a parser with the default department list.
    pub fn new() -> Self {
        Self {
            extractor: FieldExtractor::new(),
            builder: RecordBuilder::new(),
            roster: RosterExtractor::new(),
        }
    }

    /// Set the recognized department list.
    pub fn with_departments(mut self, departments: Vec<String>) -> Self {
        self.roster = RosterExtractor::with_departments(departments);
        self
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_departments(config.departments.clone())
    }
}

impl Default for RuleReportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportParser for RuleReportParser {
    fn parse(&self, text: &str, period_label: &str) -> Result<ReportExtraction> {
        let start = Instant::now();

        // The one structurally invalid call; a non-empty document in which
        // nothing matches is still a successful (empty-ish) parse
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        info!(
            period = period_label,
            "parsing report from {} characters of text",
            text.len()
        );

        let raw = self.extractor.extract(text);
        let built = self.builder.build(&raw, period_label);
        let roster = self.roster.extract(text);

        let mut warnings = Vec::new();
        let missing_fields = built.missing_fields();
        let invalid_fields = built.invalid_fields();

        for field in &invalid_fields {
            warnings.push(format!("field {} matched but failed conversion", field));
        }

        if built.record.is_empty() && roster.is_empty() {
            warnings.push("no catalog field or roster section matched".to_string());
        }

        let metadata = ExtractionMetadata {
            source_type: SourceType::PlainText,
            processing_time_ms: Some(start.elapsed().as_millis() as u64),
            warnings,
            missing_fields,
            invalid_fields,
        };

        debug!(
            period = period_label,
            missing = metadata.missing_fields.len(),
            invalid = metadata.invalid_fields.len(),
            departments = roster.len(),
            "report parsed"
        );

        Ok(ReportExtraction {
            record: built.record,
            roster,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Tenure;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SAMPLE_REPORT: &str = "\
Relatório de People Analytics - Agosto/2025

Desligamentos: 1
Média de colaboradores: 38
Admissões: 1
Faltas injustificadas: 0
Atestados médicos: 12
Dias úteis: 20
Tempo médio de casa: 792 dias
Valor total de horas extras: R$ 3.673,62
Férias vencidas: 18
Férias programadas: 3

Setor: Comercial
Ana Souza
Vendedora
01/03/2023
R$ 3.500,00
Bruno Lima
Vendedor
15/07/2022
4.200,50

Setor: Pessoal
Carla Nunes
Analista
10/01/2024
3.100,00
";

    #[test]
    fn test_parse_sample_report() {
        let parser = RuleReportParser::new();
        let extraction = parser.parse(SAMPLE_REPORT, "Agosto/2025").unwrap();

        let record = &extraction.record;
        assert_eq!(record.period_label, "Agosto/2025");
        assert_eq!(record.terminations, Some(1));
        assert_eq!(record.average_headcount, Some(38));
        assert_eq!(record.hires, Some(1));
        assert_eq!(record.unexcused_absences, Some(0));
        assert_eq!(record.medical_certificates, Some(12));
        assert_eq!(record.eligible_workdays, Some(20));
        assert_eq!(record.tenure_days, Some(792));
        assert_eq!(record.tenure, Some(Tenure { years: 2, months: 2 }));
        assert_eq!(
            record.overtime_value,
            Some(Decimal::from_str("3673.62").unwrap())
        );
        assert_eq!(record.vacation_overdue, Some(18));
        assert_eq!(record.vacation_scheduled, Some(3));

        let turnover = record.turnover.unwrap();
        assert!((turnover - 1.0 / 38.0).abs() < 1e-9);
        assert_eq!(record.absenteeism, Some(0.6));

        // Fields the report does not carry stay absent
        assert_eq!(record.dismissals_in_period, None);
        assert_eq!(record.mean_age, None);

        assert_eq!(extraction.roster["Comercial"].len(), 2);
        assert_eq!(extraction.roster["Pessoal"].len(), 1);
        assert_eq!(extraction.roster["Pessoal"][0].name, "Carla Nunes");

        let metadata = &extraction.metadata;
        assert!(metadata.invalid_fields.is_empty());
        assert!(metadata
            .missing_fields
            .contains(&"dismissals_in_period".to_string()));
    }

    #[test]
    fn test_empty_input_fails_fast() {
        let parser = RuleReportParser::new();

        assert!(matches!(
            parser.parse("", "Agosto/2025"),
            Err(ExtractionError::EmptyDocument)
        ));
        assert!(matches!(
            parser.parse("  \n\t  \n", "Agosto/2025"),
            Err(ExtractionError::EmptyDocument)
        ));
    }

    #[test]
    fn test_unrecognizable_text_is_not_an_error() {
        let parser = RuleReportParser::new();
        let extraction = parser.parse("Ata da reunião de diretoria.", "Julho/2025").unwrap();

        assert!(extraction.record.is_empty());
        assert!(extraction.roster.is_empty());
        assert!(extraction
            .metadata
            .warnings
            .iter()
            .any(|w| w.contains("no catalog field")));
    }

    #[test]
    fn test_parse_is_idempotent() {
        let parser = RuleReportParser::new();
        let first = parser.parse(SAMPLE_REPORT, "Agosto/2025").unwrap();
        let second = parser.parse(SAMPLE_REPORT, "Agosto/2025").unwrap();

        assert_eq!(first.record, second.record);
        assert_eq!(first.roster, second.roster);
    }

    #[test]
    fn test_custom_departments_via_config() {
        let config = ExtractionConfig {
            departments: vec!["Oficina".to_string()],
        };
        let parser = RuleReportParser::from_config(&config);

        let text = "Setor: Oficina\nLeo Matos\nMecânico\n09/09/2021\n2.800,00";
        let extraction = parser.parse(text, "Julho/2025").unwrap();

        assert_eq!(extraction.roster["Oficina"].len(), 1);
    }
}
