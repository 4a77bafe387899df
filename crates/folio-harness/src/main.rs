#![forbid(unsafe_code)]

//! `folio-audit`: run the dev accessibility/performance audit on a page.
//!
//! # Running
//!
//! ```sh
//! cargo run -p folio-harness --bin folio-audit -- --snapshot=page.json
//! ```
//!
//! The snapshot is the JSON form of `folio_extras::audit::DocumentSnapshot`.
//! The report goes to stdout; logs go to stderr.

mod cli;
mod logging;

use std::fmt;
use std::io;
use std::path::Path;
use std::process::ExitCode;

use folio_extras::audit::{AuditRun, DocumentSnapshot};

use crate::cli::{Command, HELP_TEXT, Opts, VERSION};

#[derive(Debug)]
enum LoadError {
    Io(io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read snapshot: {err}"),
            Self::Parse(err) => write!(f, "invalid snapshot JSON: {err}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn load(path: &Path) -> Result<DocumentSnapshot, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(DocumentSnapshot::from_json(&raw)?)
}

fn render_text(run: &AuditRun) -> String {
    let mut out = run.report.to_string();
    for test in run.tests.iter().filter(|t| !t.passed) {
        out.push_str(&format!(
            "{} [{}] ({} issues)\n",
            test.name,
            test.severity,
            test.issues.len()
        ));
        for issue in &test.issues {
            out.push_str(&format!("  - {issue}\n"));
        }
    }
    if let Some(vitals) = run.vitals {
        out.push_str(&format!("Web vitals: {vitals:?}\n"));
    }
    out
}

fn audit(opts: &Opts) -> ExitCode {
    let doc = match load(&opts.snapshot) {
        Ok(doc) => doc,
        Err(err) => {
            tracing::error!(path = %opts.snapshot.display(), error = %err, "snapshot load failed");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let run = AuditRun::execute(&doc);
    run.log();

    if opts.json {
        match serde_json::to_string_pretty(&run) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("cannot encode report: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render_text(&run));
    }

    if run.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn main() -> ExitCode {
    let command = cli::parse_from(std::env::args().skip(1), |key| std::env::var(key).ok());
    match command {
        Ok(Command::Help) => {
            println!("{HELP_TEXT}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("folio-audit {VERSION}");
            ExitCode::SUCCESS
        }
        Ok(Command::Run(opts)) => {
            if let Err(err) = logging::init(opts.json_logs) {
                eprintln!("logging disabled: {err}");
            }
            audit(&opts)
        }
        Err(err) => {
            eprintln!("{err}");
            eprintln!("Run with --help for usage information.");
            ExitCode::from(2)
        }
    }
}
