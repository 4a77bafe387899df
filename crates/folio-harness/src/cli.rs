#![forbid(unsafe_code)]

//! Command-line argument parsing for `folio-audit`.
//!
//! Parses args manually to keep the binary lean. `FOLIO_AUDIT_SNAPSHOT`
//! supplies the snapshot path when `--snapshot` is not given.

use std::fmt;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_SNAPSHOT: &str = "FOLIO_AUDIT_SNAPSHOT";

pub const HELP_TEXT: &str = "\
folio-audit: accessibility and performance audit for a page snapshot

USAGE:
    folio-audit --snapshot=PATH [OPTIONS]

OPTIONS:
    --snapshot=PATH   JSON document snapshot to audit
    --json            Print the report as JSON instead of text
    --json-logs       Emit logs as JSON lines on stderr
    --help, -h        Show this help message
    --version, -V     Show version

EXIT STATUS:
    0   No errors found
    1   The audit found errors, or the snapshot could not be read
    2   Invalid arguments

ENVIRONMENT VARIABLES:
    FOLIO_AUDIT_SNAPSHOT   Default for --snapshot
    FOLIO_LOG              Log filter (falls back to RUST_LOG, then 'info')";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub snapshot: PathBuf,
    /// Print the report as JSON.
    pub json: bool,
    /// Log as JSON lines.
    pub json_logs: bool,
}

/// What the invocation asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    MissingSnapshot,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
            Self::MissingSnapshot => {
                write!(f, "No snapshot given: pass --snapshot=PATH or set {ENV_SNAPSHOT}")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Parse `args` (without the program name), using `env` for defaults.
///
/// Explicit flags override environment values.
pub fn parse_from<I, S>(args: I, env: impl Fn(&str) -> Option<String>) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut snapshot = env(ENV_SNAPSHOT)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from);
    let mut json = false;
    let mut json_logs = false;

    for arg in args {
        match arg.as_ref() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--json" => json = true,
            "--json-logs" => json_logs = true,
            other => match other.strip_prefix("--snapshot=") {
                Some(path) if !path.is_empty() => snapshot = Some(PathBuf::from(path)),
                _ => return Err(CliError::UnknownArgument(other.to_string())),
            },
        }
    }

    let snapshot = snapshot.ok_or(CliError::MissingSnapshot)?;
    Ok(Command::Run(Opts {
        snapshot,
        json,
        json_logs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn snapshot_flag() {
        let cmd = parse_from(["--snapshot=page.json", "--json"], no_env).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Opts {
                snapshot: PathBuf::from("page.json"),
                json: true,
                json_logs: false,
            })
        );
    }

    #[test]
    fn env_supplies_default_and_flag_wins() {
        let env = |key: &str| (key == ENV_SNAPSHOT).then(|| "from-env.json".to_string());
        let Command::Run(opts) = parse_from(Vec::<String>::new(), env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(opts.snapshot, PathBuf::from("from-env.json"));

        let Command::Run(opts) = parse_from(["--snapshot=flag.json"], env).unwrap() else {
            panic!("expected run");
        };
        assert_eq!(opts.snapshot, PathBuf::from("flag.json"));
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        assert_eq!(
            parse_from(["--json"], no_env),
            Err(CliError::MissingSnapshot)
        );
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(parse_from(["--bogus", "-h"], no_env), Err(CliError::UnknownArgument("--bogus".into())));
        assert_eq!(parse_from(["-h", "--bogus"], no_env), Ok(Command::Help));
        assert_eq!(parse_from(["--version"], no_env), Ok(Command::Version));
    }

    #[test]
    fn empty_snapshot_value_rejected() {
        assert!(matches!(
            parse_from(["--snapshot="], no_env),
            Err(CliError::UnknownArgument(_))
        ));
    }

    #[test]
    fn help_text_mentions_every_flag() {
        for flag in ["--snapshot", "--json", "--json-logs", "--help", "--version", ENV_SNAPSHOT] {
            assert!(HELP_TEXT.contains(flag), "{flag}");
        }
        assert!(!VERSION.is_empty());
    }
}
