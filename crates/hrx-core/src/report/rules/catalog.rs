//! Declarative field rule catalog.
//!
//! Each catalog field is one (kind, pattern, target type) row. Adding a field
//! means adding a kind, a pattern and a row here; the extraction and
//! conversion loops never change.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns;

/// The fixed set of fields a report can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    Terminations,
    AverageHeadcount,
    Hires,
    DismissalsInPeriod,
    UnexcusedAbsences,
    MedicalCertificates,
    EligibleWorkdays,
    TenureDays,
    OvertimeValue,
    VacationOverdue,
    VacationScheduled,
    MeanAge,
    MinAge,
    MaxAge,
    MaternityLeaves,
    SickLeaves,
    AccidentLeaves,
}

impl FieldKind {
    /// Stable snake_case name, used in warnings and metadata field lists.
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Terminations => "terminations",
            FieldKind::AverageHeadcount => "average_headcount",
            FieldKind::Hires => "hires",
            FieldKind::DismissalsInPeriod => "dismissals_in_period",
            FieldKind::UnexcusedAbsences => "unexcused_absences",
            FieldKind::MedicalCertificates => "medical_certificates",
            FieldKind::EligibleWorkdays => "eligible_workdays",
            FieldKind::TenureDays => "tenure_days",
            FieldKind::OvertimeValue => "overtime_value",
            FieldKind::VacationOverdue => "vacation_overdue",
            FieldKind::VacationScheduled => "vacation_scheduled",
            FieldKind::MeanAge => "mean_age",
            FieldKind::MinAge => "min_age",
            FieldKind::MaxAge => "max_age",
            FieldKind::MaternityLeaves => "maternity_leaves",
            FieldKind::SickLeaves => "sick_leaves",
            FieldKind::AccidentLeaves => "accident_leaves",
        }
    }
}

/// Target type a raw match converts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetType {
    /// Whole non-negative count (u32).
    Count,
    /// pt-BR monetary value (Decimal).
    Money,
    /// pt-BR fractional value (f64).
    Float,
}

/// One catalog row.
pub struct FieldRule {
    /// Field this rule extracts.
    pub kind: FieldKind,
    /// Label-anchored pattern with the value in capture group 1.
    pub pattern: &'static Regex,
    /// Type the raw match converts to.
    pub target: TargetType,
}

lazy_static! {
    static ref RULES: Vec<FieldRule> = vec![
        FieldRule {
            kind: FieldKind::Terminations,
            pattern: &patterns::TERMINATIONS,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::AverageHeadcount,
            pattern: &patterns::AVERAGE_HEADCOUNT,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::Hires,
            pattern: &patterns::HIRES,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::DismissalsInPeriod,
            pattern: &patterns::DISMISSALS_IN_PERIOD,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::UnexcusedAbsences,
            pattern: &patterns::UNEXCUSED_ABSENCES,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::MedicalCertificates,
            pattern: &patterns::MEDICAL_CERTIFICATES,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::EligibleWorkdays,
            pattern: &patterns::ELIGIBLE_WORKDAYS,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::TenureDays,
            pattern: &patterns::TENURE_DAYS,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::OvertimeValue,
            pattern: &patterns::OVERTIME_VALUE,
            target: TargetType::Money,
        },
        FieldRule {
            kind: FieldKind::VacationOverdue,
            pattern: &patterns::VACATION_OVERDUE,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::VacationScheduled,
            pattern: &patterns::VACATION_SCHEDULED,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::MeanAge,
            pattern: &patterns::MEAN_AGE,
            target: TargetType::Float,
        },
        FieldRule {
            kind: FieldKind::MinAge,
            pattern: &patterns::MIN_AGE,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::MaxAge,
            pattern: &patterns::MAX_AGE,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::MaternityLeaves,
            pattern: &patterns::MATERNITY_LEAVES,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::SickLeaves,
            pattern: &patterns::SICK_LEAVES,
            target: TargetType::Count,
        },
        FieldRule {
            kind: FieldKind::AccidentLeaves,
            pattern: &patterns::ACCIDENT_LEAVES,
            target: TargetType::Count,
        },
    ];
}

/// The full rule catalog, in declaration order.
pub fn rules() -> &'static [FieldRule] {
    &RULES
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn captured(kind: FieldKind, text: &str) -> Option<String> {
        rules()
            .iter()
            .find(|rule| rule.kind == kind)
            .and_then(|rule| rule.pattern.captures(text))
            .map(|caps| caps[1].to_string())
    }

    #[test]
    fn test_each_kind_has_exactly_one_rule() {
        let kinds: BTreeSet<FieldKind> = rules().iter().map(|rule| rule.kind).collect();
        assert_eq!(kinds.len(), rules().len());
        assert_eq!(rules().len(), 17);
    }

    #[test]
    fn test_count_rules_capture_labeled_values() {
        assert_eq!(
            captured(FieldKind::Terminations, "Desligamentos: 1"),
            Some("1".to_string())
        );
        assert_eq!(
            captured(FieldKind::AverageHeadcount, "Média de colaboradores: 38"),
            Some("38".to_string())
        );
        assert_eq!(
            captured(FieldKind::AverageHeadcount, "Média Colaboradores: 38"),
            Some("38".to_string())
        );
        assert_eq!(
            captured(FieldKind::Hires, "Admissões: 1"),
            Some("1".to_string())
        );
        assert_eq!(
            captured(FieldKind::DismissalsInPeriod, "Demissões no período: 2"),
            Some("2".to_string())
        );
        assert_eq!(
            captured(FieldKind::EligibleWorkdays, "Dias úteis: 20"),
            Some("20".to_string())
        );
    }

    #[test]
    fn test_absence_rules_accept_short_and_long_labels() {
        assert_eq!(
            captured(FieldKind::UnexcusedAbsences, "Faltas injustificadas: 0"),
            Some("0".to_string())
        );
        assert_eq!(
            captured(FieldKind::UnexcusedAbsences, "Faltas: 3"),
            Some("3".to_string())
        );
        assert_eq!(
            captured(FieldKind::MedicalCertificates, "Atestados médicos: 12"),
            Some("12".to_string())
        );
        assert_eq!(
            captured(FieldKind::MedicalCertificates, "Atestados: 12"),
            Some("12".to_string())
        );
    }

    #[test]
    fn test_tenure_rule_requires_label_anchor() {
        assert_eq!(
            captured(FieldKind::TenureDays, "Tempo médio de casa: 792 dias"),
            Some("792".to_string())
        );
        assert_eq!(
            captured(FieldKind::TenureDays, "Tempo de casa: 450 dias"),
            Some("450".to_string())
        );
        // A bare day count elsewhere never matches the tenure rule
        assert_eq!(captured(FieldKind::TenureDays, "Prazo: 792 dias"), None);
    }

    #[test]
    fn test_overtime_rule_skips_currency_symbol() {
        assert_eq!(
            captured(
                FieldKind::OvertimeValue,
                "Valor total de horas extras: R$ 3.673,62"
            ),
            Some("3.673,62".to_string())
        );
        assert_eq!(
            captured(FieldKind::OvertimeValue, "Horas extras 450,00"),
            Some("450,00".to_string())
        );
        // A whole number is not a money form
        assert_eq!(captured(FieldKind::OvertimeValue, "Horas extras: 450"), None);
    }

    #[test]
    fn test_age_rules() {
        assert_eq!(
            captured(FieldKind::MeanAge, "Idade média: 32,5"),
            Some("32,5".to_string())
        );
        assert_eq!(
            captured(FieldKind::MeanAge, "Idade média: 32"),
            Some("32".to_string())
        );
        assert_eq!(
            captured(FieldKind::MinAge, "Idade mínima: 22"),
            Some("22".to_string())
        );
        assert_eq!(
            captured(FieldKind::MaxAge, "Idade máxima: 58"),
            Some("58".to_string())
        );
    }

    #[test]
    fn test_leave_rules_accept_label_variants() {
        assert_eq!(
            captured(FieldKind::MaternityLeaves, "Licenças maternidade: 0"),
            Some("0".to_string())
        );
        assert_eq!(
            captured(FieldKind::MaternityLeaves, "Licença-maternidade: 1"),
            Some("1".to_string())
        );
        assert_eq!(
            captured(FieldKind::SickLeaves, "Licenças por doença: 1"),
            Some("1".to_string())
        );
        assert_eq!(
            captured(FieldKind::SickLeaves, "Licença doença: 2"),
            Some("2".to_string())
        );
        assert_eq!(
            captured(FieldKind::AccidentLeaves, "Licenças por acidente: 0"),
            Some("0".to_string())
        );
    }

    #[test]
    fn test_count_rules_keep_grouped_thousands_raw() {
        assert_eq!(
            captured(FieldKind::TenureDays, "Tempo de casa: 1.234 dias"),
            Some("1.234".to_string())
        );
    }
}
