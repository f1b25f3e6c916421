//! Command flow behind the `suggest-strand-version` binary.
//!
//! Kept in the library so the whole flow can be driven with any
//! [`VersionSuggester`] and in-memory output streams.

use std::io::Write;
use std::path::PathBuf;

use tracing::{error, warn};

use crate::client::VersionSuggester;
use crate::error::SuggestError;
use crate::loader::{check_json_schema, load_schema};
use crate::output::append_outputs;

const RED: &str = "\x1b[0;31m";
const GREEN: &str = "\x1b[0;32m";
const NO_COLOUR: &str = "\x1b[0m";

/// Banner printed to stderr when the service rejects the suggestion.
pub const FAILURE_BANNER: &str = "SEMANTIC VERSION SUGGESTION FAILED.";

/// Banner printed to stderr before the suggested version.
pub const SUCCESS_BANNER: &str = "SEMANTIC VERSION SUGGESTION SUCCEEDED:";

/// Inputs to one suggestion run.
#[derive(Debug, Clone)]
pub struct SuggestArgs {
    pub token: String,
    pub account: String,
    pub name: String,
    /// Path to the proposed JSON schema.
    pub path: PathBuf,
    /// File the `key=value` outputs are appended to.
    pub output_file: PathBuf,
}

/// Load the schema, ask `suggester` for a version and report the outcome.
///
/// On success the bare version goes to `stdout`, a banner to `stderr`, and
/// the outputs are appended to `args.output_file`. On failure nothing is
/// written to the output file and the exit code is returned as `Err`.
pub fn run_suggest<S, O, E>(
    args: &SuggestArgs,
    suggester: &S,
    stdout: &mut O,
    stderr: &mut E,
) -> Result<(), u8>
where
    S: VersionSuggester + ?Sized,
    O: Write,
    E: Write,
{
    let schema = load_schema(&args.path).map_err(|e| {
        let _ = writeln!(stderr, "Error: {}", e);
        e.exit_code() as u8
    })?;

    if let Some(problem) = check_json_schema(&schema) {
        warn!(path = %args.path.display(), "proposed document is not a valid JSON schema: {}", problem);
    }

    let suggestion = match suggester.suggest_strand_version(
        &args.token,
        &args.account,
        &args.name,
        &schema,
    ) {
        Ok(suggestion) => suggestion,
        Err(SuggestError::Remote(failure)) => {
            error!("{}", failure);
            let _ = writeln!(stderr, "{}{}{}", RED, FAILURE_BANNER, NO_COLOUR);
            return Err(1);
        }
        Err(e) => {
            let _ = writeln!(stderr, "Error: {}", e);
            return Err(e.exit_code() as u8);
        }
    };

    append_outputs(&args.output_file, &suggestion).map_err(|e| {
        let _ = writeln!(
            stderr,
            "Error writing to {}: {}",
            args.output_file.display(),
            e
        );
        3u8
    })?;

    let _ = writeln!(
        stderr,
        "{}{}{} {}.",
        GREEN, SUCCESS_BANNER, NO_COLOUR, suggestion.version
    );
    writeln!(stdout, "{}", suggestion.version)
        .and_then(|()| stdout.flush())
        .map_err(|e| {
            let _ = writeln!(stderr, "Error writing version to stdout: {}", e);
            3u8
        })
}
