#![forbid(unsafe_code)]

//! Development-only audit runner with mutation debounce.
//!
//! The host reports document mutations; the audit reruns once mutations have
//! been quiet for [`RERUN_DEBOUNCE`]. When the site config has the dev audit
//! off, nothing runs and nothing is logged.

use std::time::{Duration, Instant};

use folio_core::config::SiteConfig;
use serde::Serialize;

use super::checks::run_all_validations;
use super::report::ValidationReport;
use super::snapshot::{DocumentSnapshot, VitalsStatus};
use super::suite::{AuditTestResult, log_test_results, run_accessibility_tests, total_issues};

/// Quiet period after the last mutation before rerunning.
pub const RERUN_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Everything one audit pass produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRun {
    pub report: ValidationReport,
    pub tests: Vec<AuditTestResult>,
    pub vitals: Option<VitalsStatus>,
}

impl AuditRun {
    /// Run validations and the test suite against `doc`.
    #[must_use]
    pub fn execute(doc: &DocumentSnapshot) -> Self {
        Self {
            report: ValidationReport::from_findings(run_all_validations(doc)),
            tests: run_accessibility_tests(doc),
            vitals: doc.vitals.map(|v| v.status()),
        }
    }

    /// Failed findings plus test issues.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.report.errors.len() + self.report.warnings.len() + total_issues(&self.tests)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.report.has_errors()
    }

    pub fn log(&self) {
        self.report.log();
        log_test_results(&self.tests);
    }
}

/// Gate and debounce for the dev audit.
#[derive(Debug, Clone)]
pub struct DevAudit {
    enabled: bool,
    last_mutation: Option<Instant>,
    runs: u64,
}

impl DevAudit {
    #[must_use]
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            enabled: config.dev_audit,
            last_mutation: None,
            runs: 0,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Completed runs.
    #[must_use]
    pub fn runs(&self) -> u64 {
        self.runs
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.last_mutation.is_some()
    }

    /// Run immediately, e.g. on page load.
    pub fn run(&mut self, doc: &DocumentSnapshot) -> Option<AuditRun> {
        if !self.enabled {
            return None;
        }
        self.last_mutation = None;
        self.runs += 1;
        let run = AuditRun::execute(doc);
        run.log();
        Some(run)
    }

    /// The document changed; restarts the quiet period.
    pub fn on_mutation(&mut self, now: Instant) {
        if self.enabled {
            self.last_mutation = Some(now);
        }
    }

    /// Run if a mutation has been quiet for the debounce period.
    pub fn poll(&mut self, now: Instant, doc: &DocumentSnapshot) -> Option<AuditRun> {
        let due = self
            .last_mutation
            .is_some_and(|at| now.saturating_duration_since(at) >= RERUN_DEBOUNCE);
        if !due {
            return None;
        }
        self.run(doc)
    }
}
