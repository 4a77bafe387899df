#![forbid(unsafe_code)]

//! Development accessibility and performance audit.
//!
//! The host serializes what it sees into a [`DocumentSnapshot`]; the audit
//! turns that into severity-tagged [`Finding`]s, a [`ValidationReport`], and
//! the named test suite in [`run_accessibility_tests`].
//!
//! # Example
//!
//! ```rust
//! use folio_extras::audit::{DocumentSnapshot, ValidationReport, run_all_validations};
//!
//! let doc = DocumentSnapshot::from_json(r#"{"headings":[1,2,3],"has_main":true}"#).unwrap();
//! let report = ValidationReport::from_findings(run_all_validations(&doc));
//! assert_eq!(report.summary.total, report.summary.errors + report.summary.warnings + report.summary.info);
//! ```
//!
//! # Severity Guide
//!
//! | Severity | Meaning |
//! |----------|---------|
//! | `Error` | Fails an accessibility requirement |
//! | `Warning` | Likely problem or missed optimisation |
//! | `Info` | Passing check or environment note |

mod checks;
mod dev;
mod report;
mod snapshot;
mod suite;

pub use checks::{
    CATEGORY_CONTRAST, CATEGORY_FORMS, CATEGORY_HEADINGS, CATEGORY_IMAGES, CATEGORY_KEYBOARD,
    CATEGORY_PERFORMANCE, Finding, Severity, form_accessibility_issues, run_accessibility_validation,
    run_all_validations, run_performance_validation,
};
pub use dev::{AuditRun, DevAudit, RERUN_DEBOUNCE};
pub use report::{ReportSummary, ValidationReport};
pub use snapshot::{
    AriaInfo, DocumentSnapshot, FormInfo, ImageInfo, InputInfo, InteractiveInfo, TextElementInfo,
    VitalsStatus, WebVitals,
};
pub use suite::{
    AuditTestResult, MAX_ALT_CHARS, MIN_TOUCH_TARGET_PX, log_test_results, run_accessibility_tests,
    total_issues,
};
