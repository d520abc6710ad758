//! Employee roster data model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Roster entries grouped by department name, in stable (sorted) order.
pub type RosterByDepartment = BTreeMap<String, Vec<EmployeeEntry>>;

/// One employee row recovered from a departmental roster section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeEntry {
    /// Employee name as printed in the report.
    pub name: String,

    /// Role or job title.
    pub role: String,

    /// Admission date exactly as printed (usually dd/mm/yyyy). Kept raw so a
    /// misprinted date survives extraction instead of dropping the entry.
    pub admission: String,

    /// Monthly salary. Zero when the printed value could not be parsed.
    pub salary: Decimal,
}

impl EmployeeEntry {
    /// Admission date parsed as dd/mm/yyyy, if the raw text is well formed.
    pub fn admission_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.admission.trim(), "%d/%m/%Y").ok()
    }
}

/// Sum of salaries per department.
pub fn payroll_by_department(roster: &RosterByDepartment) -> BTreeMap<String, Decimal> {
    roster
        .iter()
        .map(|(department, entries)| {
            let total: Decimal = entries.iter().map(|entry| entry.salary).sum();
            (department.clone(), total)
        })
        .collect()
}

/// Number of entries per department.
pub fn headcount_by_department(roster: &RosterByDepartment) -> BTreeMap<String, usize> {
    roster
        .iter()
        .map(|(department, entries)| (department.clone(), entries.len()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn entry(name: &str, salary: &str) -> EmployeeEntry {
        EmployeeEntry {
            name: name.to_string(),
            role: "Analista".to_string(),
            admission: "01/03/2023".to_string(),
            salary: Decimal::from_str(salary).unwrap(),
        }
    }

    #[test]
    fn test_admission_date_parses_br_format() {
        let e = entry("Ana Souza", "3500.00");
        assert_eq!(
            e.admission_date(),
            Some(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap())
        );
    }

    #[test]
    fn test_admission_date_tolerates_garbage() {
        let mut e = entry("Ana Souza", "3500.00");
        e.admission = "31/02/2023".to_string();
        assert_eq!(e.admission_date(), None);

        e.admission = "em breve".to_string();
        assert_eq!(e.admission_date(), None);
    }

    #[test]
    fn test_payroll_and_headcount() {
        let mut roster = RosterByDepartment::new();
        roster.insert(
            "Comercial".to_string(),
            vec![entry("Ana", "3500.00"), entry("Bruno", "4200.50")],
        );
        roster.insert("Fênix".to_string(), vec![entry("Carla", "2900.00")]);

        let payroll = payroll_by_department(&roster);
        assert_eq!(payroll["Comercial"], Decimal::from_str("7700.50").unwrap());
        assert_eq!(payroll["Fênix"], Decimal::from_str("2900.00").unwrap());

        let headcount = headcount_by_department(&roster);
        assert_eq!(headcount["Comercial"], 2);
        assert_eq!(headcount["Fênix"], 1);
    }
}
