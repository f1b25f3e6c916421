//! Strand Version Suggestion CLI
//!
//! Suggests the semantic version for an updated JSON schema. Exits 0 on
//! success and 1 if the Strands API rejects the suggestion.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use suggest_strand_version::{
    run_suggest, StrandsClient, SuggestArgs, SuggestError, API_URL_ENV, DEFAULT_API_URL,
    OUTPUT_FILE_ENV,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "suggest-strand-version")]
#[command(about = "Suggest the semantic version for an updated JSON schema")]
#[command(version, disable_version_flag = true)]
struct Cli {
    /// A Strands access token with permission to create a strand version for the given strand
    token: String,

    /// The account handle of the strand the new JSON schema should be compared against
    account: String,

    /// The name of the strand the new JSON schema should be compared against
    name: String,

    /// The path to the JSON schema to use (relative to the repository root)
    path: PathBuf,

    /// Strands GraphQL endpoint
    #[arg(long, env = API_URL_ENV, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File to append the `key=value` outputs to
    #[arg(long, env = OUTPUT_FILE_ENV)]
    output_file: PathBuf,

    /// Request timeout in seconds (transport default if not set)
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Print the version of the suggest-strand-version CLI
    #[arg(short = 'v', long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // stdout carries only the suggested version
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = match build_client(&cli.api_url, cli.timeout) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code() as u8);
        }
    };

    let args = SuggestArgs {
        token: cli.token,
        account: cli.account,
        name: cli.name,
        path: cli.path,
        output_file: cli.output_file,
    };

    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    match run_suggest(&args, &client, &mut stdout.lock(), &mut stderr.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn build_client(api_url: &str, timeout: Option<u64>) -> Result<StrandsClient, SuggestError> {
    match timeout {
        Some(secs) => StrandsClient::with_timeout(api_url, Duration::from_secs(secs)),
        None => StrandsClient::new(api_url),
    }
}
