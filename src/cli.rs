// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Command-line front end over the validation engine.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use tracing::warn;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use docintegrity::logic::revision::{
    check_sequence, diagnose_revision_number, next_number, span_from_days, validate_temporal_pair,
};
use docintegrity::utils::{guess_mime, hash_file};
use docintegrity::{AllowList, FileIntegrityValidator, FileSubmission, TracingObserver};

/// Integrity checks for legal document uploads
#[derive(Parser, Debug)]
#[command(name = "docintegrity", version, about, long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a file on disk and print the outcome as JSON
    Check {
        /// File to validate
        path: PathBuf,

        /// Claimed MIME type (guessed from the extension when omitted)
        #[arg(long)]
        mime: Option<String>,

        /// Claimed SHA-256 checksum (computed from the file when omitted)
        #[arg(long)]
        checksum: Option<String>,

        /// JSON allow-list replacing the built-in one
        #[arg(long)]
        allow_list: Option<PathBuf>,
    },

    /// Propose valid alternatives for a file name
    Suggest {
        name: String,

        /// Number of suggestions (at most 10)
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
    },

    /// Print the next revision number for an existing history
    NextRevision {
        /// Revision numbers already stored
        numbers: Vec<i64>,
    },

    /// Diagnose a candidate revision number
    #[command(allow_negative_numbers = true)]
    CheckRevision {
        candidate: i64,

        /// Revision numbers already stored
        numbers: Vec<i64>,
    },

    /// Check a creation/modification date pair (RFC 3339)
    CheckDates {
        created: String,
        modified: String,

        /// Maximum days between creation and modification
        #[arg(long)]
        max_span_days: Option<i64>,
    },
}

/// Parse arguments, initialize logging and dispatch the subcommand.
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check {
            path,
            mime,
            checksum,
            allow_list,
        } => check(&path, mime, checksum, allow_list.as_deref()).map(exit_code),
        Command::Suggest { name, count } => {
            for suggestion in FileIntegrityValidator::default().suggest_file_names(&name, count) {
                println!("{suggestion}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::NextRevision { numbers } => {
            for problem in check_sequence(&numbers) {
                warn!(%problem, "inconsistent revision history");
            }
            println!("{}", next_number(&numbers));
            Ok(ExitCode::SUCCESS)
        }
        Command::CheckRevision { candidate, numbers } => {
            let diagnosis = diagnose_revision_number(candidate, &numbers);
            print_json(&diagnosis)?;
            Ok(exit_code(diagnosis.is_valid))
        }
        Command::CheckDates {
            created,
            modified,
            max_span_days,
        } => {
            let violations = validate_temporal_pair(
                parse_timestamp(&created)?,
                parse_timestamp(&modified)?,
                max_span(max_span_days)?,
            );
            let is_valid = violations.is_empty();
            print_json(&json!({ "isValid": is_valid, "violations": violations }))?;
            Ok(exit_code(is_valid))
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn check(
    path: &Path,
    mime: Option<String>,
    checksum: Option<String>,
    allow_list: Option<&Path>,
) -> Result<bool> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("{} has no UTF-8 file name", path.display()))?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let mime = mime.unwrap_or_else(|| guess_mime(path));
    let checksum = match checksum {
        Some(checksum) => checksum,
        None => hash_file(path)?,
    };

    let allow_list = match allow_list {
        Some(list_path) => {
            let raw = fs::read_to_string(list_path)
                .with_context(|| format!("Failed to read allow-list {}", list_path.display()))?;
            Arc::new(AllowList::from_json_str(&raw)?)
        }
        None => AllowList::shared_standard(),
    };

    let validator = FileIntegrityValidator::new(allow_list).with_observer(Arc::new(TracingObserver));
    let submission =
        FileSubmission::new(file_name, extension, bytes.len() as u64, &mime, &checksum)
            .with_bytes(&bytes);
    let outcome = validator.validate(&submission);

    let mut report = serde_json::to_value(&outcome).context("Failed to serialize outcome")?;
    if !validator.is_valid_file_name(file_name)
        && let Value::Object(fields) = &mut report
    {
        fields.insert(
            "suggestions".into(),
            json!(validator.suggest_file_names(file_name, 5)),
        );
    }
    print_json(&report)?;
    Ok(outcome.is_valid())
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(value, &Rfc3339)
        .with_context(|| format!("'{value}' is not an RFC 3339 timestamp"))
}

fn max_span(days: Option<i64>) -> Result<Option<Duration>> {
    days.map(|days| {
        span_from_days(days).with_context(|| format!("--max-span-days {days} is out of range"))
    })
    .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn exit_code(is_valid: bool) -> ExitCode {
    if is_valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_check_with_options() {
        let cli = Cli::try_parse_from([
            "docintegrity",
            "-vv",
            "check",
            "brief.pdf",
            "--mime",
            "application/pdf",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Check { path, mime, checksum, allow_list } => {
                assert_eq!(path, PathBuf::from("brief.pdf"));
                assert_eq!(mime.as_deref(), Some("application/pdf"));
                assert!(checksum.is_none());
                assert!(allow_list.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_negative_revision_candidates() {
        let cli = Cli::try_parse_from(["docintegrity", "check-revision", "-3", "1", "2"]).unwrap();
        match cli.command {
            Command::CheckRevision { candidate, numbers } => {
                assert_eq!(candidate, -3);
                assert_eq!(numbers, vec![1, 2]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parse_timestamp_accepts_offsets_and_rejects_garbage() {
        let parsed = parse_timestamp("2024-05-01T10:00:00+02:00").unwrap();
        assert_eq!(parsed.unix_timestamp(), 1_714_550_400);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn max_span_rejects_unrepresentable_day_counts() {
        assert_eq!(max_span(None).unwrap(), None);
        assert_eq!(max_span(Some(30)).unwrap(), Some(Duration::days(30)));

        let err = max_span(Some(i64::MAX)).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");

        let cli = Cli::try_parse_from([
            "docintegrity",
            "check-dates",
            "2024-01-01T00:00:00Z",
            "2024-01-02T00:00:00Z",
            "--max-span-days",
            "9223372036854775807",
        ])
        .unwrap();
        match cli.command {
            Command::CheckDates { max_span_days, .. } => assert!(max_span(max_span_days).is_err()),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn check_reports_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.pdf");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"%PDF-1.7\n%content").unwrap();

        assert!(check(&path, None, None, None).unwrap());
    }

    #[test]
    fn check_fails_for_wrong_checksum_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brief.pdf");
        fs::write(&path, b"%PDF-1.7\n").unwrap();

        assert!(!check(&path, None, Some("0".repeat(64)), None).unwrap());
        assert!(check(&dir.path().join("missing.pdf"), None, None, None).is_err());
    }
}
