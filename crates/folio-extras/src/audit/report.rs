#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use super::checks::{Finding, Severity};

/// Counts over a set of findings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub errors: usize,
    pub warnings: usize,
    pub info: usize,
    pub passed: usize,
}

/// Findings grouped by severity, with a summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub summary: ReportSummary,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub info: Vec<Finding>,
}

impl ValidationReport {
    #[must_use]
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let mut report = Self {
            summary: ReportSummary {
                total: findings.len(),
                passed: findings.iter().filter(|f| f.passed).count(),
                ..ReportSummary::default()
            },
            ..Self::default()
        };
        for finding in findings {
            match finding.severity {
                Severity::Error => report.errors.push(finding),
                Severity::Warning => report.warnings.push(finding),
                Severity::Info => report.info.push(finding),
            }
        }
        report.summary.errors = report.errors.len();
        report.summary.warnings = report.warnings.len();
        report.summary.info = report.info.len();
        report
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Emit the report through `tracing`.
    pub fn log(&self) {
        let s = &self.summary;
        tracing::info!(
            total = s.total,
            errors = s.errors,
            warnings = s.warnings,
            info = s.info,
            passed = s.passed,
            "accessibility and performance validation"
        );
        for f in &self.errors {
            tracing::error!(category = %f.category, test = %f.test, "{}", f.message);
        }
        for f in &self.warnings {
            tracing::warn!(category = %f.category, test = %f.test, "{}", f.message);
        }
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.summary;
        writeln!(
            f,
            "Validation report: {} checks, {} passed ({} errors, {} warnings, {} info)",
            s.total, s.passed, s.errors, s.warnings, s.info
        )?;
        for (label, group) in [("Errors", &self.errors), ("Warnings", &self.warnings)] {
            if group.is_empty() {
                continue;
            }
            writeln!(f, "{label}:")?;
            for finding in group {
                writeln!(f, "  {}: {}", finding.category, finding.message)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finding(severity: Severity, passed: bool) -> Finding {
        Finding::new("Cat", "t", passed, "m", severity)
    }

    #[test]
    fn summary_counts() {
        let report = ValidationReport::from_findings(vec![
            finding(Severity::Error, false),
            finding(Severity::Warning, false),
            finding(Severity::Warning, false),
            finding(Severity::Info, true),
            finding(Severity::Info, false),
        ]);
        assert_eq!(
            report.summary,
            ReportSummary { total: 5, errors: 1, warnings: 2, info: 2, passed: 1 }
        );
        assert!(report.has_errors());
    }

    #[test]
    fn empty_report() {
        let report = ValidationReport::from_findings(Vec::new());
        assert_eq!(report.summary, ReportSummary::default());
        assert!(!report.has_errors());
        assert_eq!(
            report.to_string(),
            "Validation report: 0 checks, 0 passed (0 errors, 0 warnings, 0 info)\n"
        );
    }

    #[test]
    fn display_lists_problems() {
        let report = ValidationReport::from_findings(vec![
            Finding::new("Heading Structure", "Page structure", false, "No H1 element found", Severity::Error),
            finding(Severity::Info, true),
        ]);
        let text = report.to_string();
        assert!(text.contains("Errors:\n  Heading Structure: No H1 element found\n"));
        assert!(!text.contains("Warnings:"));
    }
}
