//! Departmental roster extraction.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::rules::numbers::parse_br_decimal;
use super::rules::patterns::DEPARTMENT_HEADER;
use crate::models::config::ExtractionConfig;
use crate::models::roster::{EmployeeEntry, RosterByDepartment};

/// Splits a report into department sections and decodes the employee rows
/// inside each one.
///
/// A section starts at a header line naming a known department and runs to
/// the next header line (known or not) or the end of text. Inside a section,
/// employees are flat four-line runs: name, role, admission date, salary.
/// The encoding has no terminator, so a trailing partial run is discarded
/// and any blank line shifts the runs after it; sources are expected to
/// print none.
pub struct RosterExtractor {
    departments: Vec<String>,
}

impl RosterExtractor {
    /// Create an extractor with the default department list.
    pub fn new() -> Self {
        Self {
            departments: ExtractionConfig::default().departments,
        }
    }

    /// Create an extractor recognizing the given departments.
    pub fn with_departments(departments: Vec<String>) -> Self {
        Self { departments }
    }

    /// Extract the per-department roster from report text.
    ///
    /// Departments without a matching section get no key; a matched section
    /// with no decodable rows gets an empty entry list.
    pub fn extract(&self, text: &str) -> RosterByDepartment {
        let mut roster = RosterByDepartment::new();

        // Header match positions delimit sections; no lookahead needed
        let headers: Vec<(usize, usize, String)> = DEPARTMENT_HEADER
            .captures_iter(text)
            .map(|caps| {
                let whole = caps.get(0).unwrap();
                (whole.start(), whole.end(), caps[1].trim().to_string())
            })
            .collect();

        for (index, (_, body_start, header_name)) in headers.iter().enumerate() {
            let Some(department) = self.match_department(header_name) else {
                debug!(header = %header_name, "header names no known department");
                continue;
            };

            let section_end = headers
                .get(index + 1)
                .map(|(next_start, _, _)| *next_start)
                .unwrap_or(text.len());

            let entries = parse_section(&text[*body_start..section_end]);
            debug!(
                department = %department,
                entries = entries.len(),
                "roster section parsed"
            );
            roster.entry(department).or_default().extend(entries);
        }

        roster
    }

    /// Canonical configured name for a header, matched case-insensitively.
    fn match_department(&self, header_name: &str) -> Option<String> {
        let lowered = header_name.to_lowercase();
        self.departments
            .iter()
            .find(|department| lowered.contains(&department.to_lowercase()))
            .cloned()
    }
}

impl Default for RosterExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_section(body: &str) -> Vec<EmployeeEntry> {
    let lines: Vec<&str> = body.lines().collect();

    // The header's own line ending leads the body; it is not an employee line
    let first = lines
        .iter()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(lines.len());
    let lines = &lines[first..];

    let mut entries = Vec::new();

    for group in lines.chunks(4) {
        if group.len() < 4 {
            if !group.iter().all(|line| line.trim().is_empty()) {
                warn!(
                    "discarding trailing partial employee group of {} line(s)",
                    group.len()
                );
            }
            break;
        }

        let name = group[0].trim();
        let role = group[1].trim();
        let admission = group[2].trim();
        let salary_raw = group[3].trim();

        if name.is_empty() || role.is_empty() || admission.is_empty() || salary_raw.is_empty() {
            warn!("skipping employee group with empty field(s)");
            continue;
        }

        let salary = match parse_br_decimal(salary_raw) {
            Some(salary) => salary,
            None => {
                warn!(
                    name = %name,
                    salary = %salary_raw,
                    "unparseable salary, keeping entry with zero"
                );
                Decimal::ZERO
            }
        };

        entries.push(EmployeeEntry {
            name: name.to_string(),
            role: role.to_string(),
            admission: admission.to_string(),
            salary,
        });
    }

    entries
}
