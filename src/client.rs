//! Strands API client for semantic version suggestions.
//!
//! One blocking POST per suggestion. No retries: a failure is reported to
//! the caller as-is.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::SuggestError;
use crate::graphql::{GraphQlRequest, GraphQlResponse, SuggestVariables};
use crate::types::{Suid, VersionSuggestion};

/// Default Strands GraphQL endpoint.
pub const DEFAULT_API_URL: &str = "https://api.octue.com/graphql/";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "STRANDS_API_URL";

/// Something that can suggest a semantic version for a proposed schema.
///
/// The CLI runner depends on this trait rather than on [`StrandsClient`]
/// directly, so tests can substitute their own implementation.
pub trait VersionSuggester {
    /// Suggest the semantic version of `schema` relative to the latest
    /// version of strand `account/name`.
    fn suggest_strand_version(
        &self,
        token: &str,
        account: &str,
        name: &str,
        schema: &Value,
    ) -> Result<VersionSuggestion, SuggestError>;
}

/// HTTP client for the Strands GraphQL API.
#[derive(Debug, Clone)]
pub struct StrandsClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl StrandsClient {
    /// Create a client for `endpoint` using the transport's default timeout.
    ///
    /// # Errors
    ///
    /// Returns `SuggestError::Transport` if the HTTP client can't be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SuggestError> {
        Self::build(endpoint.into(), None)
    }

    /// Create a client for `endpoint` with an explicit request timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SuggestError> {
        Self::build(endpoint.into(), Some(timeout))
    }

    /// Create a client for the endpoint named by `STRANDS_API_URL`, falling
    /// back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self, SuggestError> {
        let endpoint =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(endpoint)
    }

    fn build(endpoint: String, timeout: Option<Duration>) -> Result<Self, SuggestError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|source| SuggestError::Transport {
            url: endpoint.clone(),
            source,
        })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask for a suggested version of the `proposed` schema (already
    /// JSON-encoded) relative to the strand identified by `base`.
    ///
    /// # Errors
    ///
    /// Returns `SuggestError::Remote` if the service rejects the request,
    /// `SuggestError::Transport` if it can't be reached or answers with an
    /// HTTP error, and `SuggestError::UnexpectedResponse` if the body can't
    /// be decoded.
    pub fn suggest_sem_ver(
        &self,
        token: &str,
        base: &Suid,
        proposed: &str,
    ) -> Result<VersionSuggestion, SuggestError> {
        let request = GraphQlRequest::suggest_sem_ver(SuggestVariables {
            token,
            base: base.as_str(),
            proposed,
        });

        info!("Getting suggested semantic version...");
        debug!(endpoint = %self.endpoint, base = %base, "sending suggestSemVerViaToken");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|source| self.transport(source))?;

        // GraphQL servers may answer request-level errors with a 4xx status
        // and an `errors` body; those are rejections, not transport failures.
        let rejected_status = response.status().is_client_error();
        let status_error = response.error_for_status_ref().err();
        let body = response.text().map_err(|source| self.transport(source))?;
        let decoded = match (status_error, serde_json::from_str::<GraphQlResponse>(&body)) {
            (None, Ok(decoded)) => decoded,
            (Some(_), Ok(decoded)) if rejected_status && !decoded.errors.is_empty() => decoded,
            (Some(source), _) => return Err(self.transport(source)),
            (None, Err(e)) => {
                return Err(SuggestError::UnexpectedResponse {
                    url: self.endpoint.clone(),
                    message: e.to_string(),
                })
            }
        };

        let suggestion = match decoded.into_outcome() {
            Some(Ok(suggestion)) => suggestion,
            Some(Err(failure)) => return Err(SuggestError::Remote(failure)),
            None => {
                return Err(SuggestError::UnexpectedResponse {
                    url: self.endpoint.clone(),
                    message: "response has no suggestSemVerViaToken payload".to_string(),
                })
            }
        };

        info!(
            "The suggested semantic version is {}. This represents a {}.",
            suggestion.version,
            suggestion.change_type()
        );

        Ok(suggestion)
    }

    fn transport(&self, source: reqwest::Error) -> SuggestError {
        SuggestError::Transport {
            url: self.endpoint.clone(),
            source,
        }
    }
}

impl VersionSuggester for StrandsClient {
    fn suggest_strand_version(
        &self,
        token: &str,
        account: &str,
        name: &str,
        schema: &Value,
    ) -> Result<VersionSuggestion, SuggestError> {
        let suid = Suid::new(account, name);
        let proposed = encode_schema(schema)?;
        self.suggest_sem_ver(token, &suid, &proposed)
    }
}

/// Serialize a schema for the `proposed` variable.
pub fn encode_schema(schema: &Value) -> Result<String, SuggestError> {
    Ok(serde_json::to_string(schema)?)
}
