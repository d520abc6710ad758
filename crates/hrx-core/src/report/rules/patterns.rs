//! Regex patterns for Brazilian-Portuguese HR report extraction.
//!
//! Field patterns run over normalized text (line breaks collapsed to spaces)
//! and anchor on a label keyword, so overlapping numeric shapes are told
//! apart by specificity, not rule order. The department header pattern is the
//! exception: it is line-anchored and runs over the raw text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Line-break runs, collapsed to single spaces before field matching
    pub static ref LINE_BREAKS: Regex = Regex::new(
        r"[\r\n]+"
    ).unwrap();

    // Headcount and movement counts
    pub static ref TERMINATIONS: Regex = Regex::new(
        r"(?i)desligamentos[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref AVERAGE_HEADCOUNT: Regex = Regex::new(
        r"(?i)média\s+(?:de\s+)?colaboradores[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref HIRES: Regex = Regex::new(
        r"(?i)admissões[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref DISMISSALS_IN_PERIOD: Regex = Regex::new(
        r"(?i)demissões\s+no\s+período[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Absence counts
    pub static ref UNEXCUSED_ABSENCES: Regex = Regex::new(
        r"(?i)faltas(?:\s+injustificadas)?[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref MEDICAL_CERTIFICATES: Regex = Regex::new(
        r"(?i)atestados(?:\s+médicos)?[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref ELIGIBLE_WORKDAYS: Regex = Regex::new(
        r"(?i)dias\s+úteis[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Tenure (reported in days)
    pub static ref TENURE_DAYS: Regex = Regex::new(
        r"(?i)tempo\s+(?:médio\s+)?de\s+casa[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Overtime value (pt-BR money form: 3.673,62); the label is usually
    // followed by "R$", so anything non-numeric may sit between label and value
    pub static ref OVERTIME_VALUE: Regex = Regex::new(
        r"(?i)horas\s+extras[^\d]*(\d{1,3}(?:\.\d{3})*,\d{2}|\d+,\d{2})"
    ).unwrap();

    // Vacation balances
    pub static ref VACATION_OVERDUE: Regex = Regex::new(
        r"(?i)férias\s+vencidas[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref VACATION_SCHEDULED: Regex = Regex::new(
        r"(?i)férias\s+programadas[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Age statistics
    pub static ref MEAN_AGE: Regex = Regex::new(
        r"(?i)idade\s+média[\s:]*(\d+(?:,\d+)?)"
    ).unwrap();

    pub static ref MIN_AGE: Regex = Regex::new(
        r"(?i)idade\s+mínima[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref MAX_AGE: Regex = Regex::new(
        r"(?i)idade\s+máxima[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Leave counts
    pub static ref MATERNITY_LEAVES: Regex = Regex::new(
        r"(?i)licen[çc]as?[\s\-]*maternidade[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref SICK_LEAVES: Regex = Regex::new(
        r"(?i)licen[çc]as?(?:\s+por)?[\s\-]*doen[çc]a[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    pub static ref ACCIDENT_LEAVES: Regex = Regex::new(
        r"(?i)licen[çc]as?(?:\s+por)?[\s\-]*acidente[\s:]*(\d+(?:\.\d{3})*)"
    ).unwrap();

    // Department section header (roster sections, matched on raw text lines)
    pub static ref DEPARTMENT_HEADER: Regex = Regex::new(
        r"(?im)^\s*(?:setor|departamento|centro\s+de\s+custo)\s*[:\-]?\s*(.+)$"
    ).unwrap();
}
