//! Strand Version Suggestion
//!
//! Asks the Strands API which semantic version a changed JSON schema should
//! get, relative to the latest version of an existing strand.
//!
//! The comparison itself happens server-side. This crate sends the
//! `suggestSemVerViaToken` mutation, decodes its result union, and reports
//! the outcome to CI through exit codes and a `key=value` output file.
//!
//! # Example
//!
//! ```no_run
//! use suggest_strand_version::{StrandsClient, VersionSuggester};
//! use serde_json::json;
//!
//! let client = StrandsClient::from_env().unwrap();
//! let schema = json!({ "type": "object" });
//!
//! let suggestion = client
//!     .suggest_strand_version("my-token", "my-account", "my-strand", &schema)
//!     .unwrap();
//! println!("{} ({})", suggestion.version, suggestion.change_type());
//! ```
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Suggestion succeeded |
//! | 1 | The service rejected the suggestion |
//! | 2 | Invalid JSON or usage error |
//! | 3 | File IO or transport failure |

mod client;
mod error;
mod graphql;
mod loader;
mod output;
mod runner;
mod types;

pub use client::{encode_schema, StrandsClient, VersionSuggester, API_URL_ENV, DEFAULT_API_URL};
pub use error::{LoadError, SuggestError};
pub use graphql::{
    GraphQlError, GraphQlRequest, GraphQlResponse, SuggestVariables, SuggestionPayload,
    SUGGEST_SEM_VER_MUTATION,
};
pub use loader::{check_json_schema, load_schema};
pub use output::{append_outputs, format_outputs, OUTPUT_FILE_ENV};
pub use runner::{run_suggest, SuggestArgs, FAILURE_BANNER, SUCCESS_BANNER};
pub use types::{ChangeType, OperationMessage, RemoteFailure, Suid, VersionSuggestion};
