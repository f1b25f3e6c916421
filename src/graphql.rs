//! GraphQL wire format for the `suggestSemVerViaToken` mutation.
//!
//! The mutation returns a union of three shapes. They are decoded into
//! [`SuggestionPayload`] by shape, error shapes first, so any error
//! indicator in the payload is treated as a rejection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::types::{OperationMessage, RemoteFailure, VersionSuggestion};

/// Name of the mutation and of its result field in `data`.
pub const OPERATION_NAME: &str = "suggestSemVerViaToken";

/// Kind assigned to messages built from top-level GraphQL errors.
pub const GRAPHQL_ERROR_KIND: &str = "GRAPHQL_ERROR";

/// Mutation document sent on every request.
pub const SUGGEST_SEM_VER_MUTATION: &str = r#"mutation suggestSemVerViaToken(
    $token: String!,
    $base: String!,
    $proposed: String!,
) {
    suggestSemVerViaToken(token: $token, base: $base, proposed: $proposed) {
        ... on VersionSuggestion {
            suggestedVersion
            isBreaking
            isFeature
            isPatch
        }
        ... on VersionSuggestionError {
            type
            message
        }
        ... on OperationInfo {
            messages {
                kind
                message
                field
                code
            }
        }
    }
}"#;

/// Variables of the mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestVariables<'a> {
    pub token: &'a str,
    /// SUID of the strand to compare against.
    pub base: &'a str,
    /// Proposed schema, JSON-encoded.
    pub proposed: &'a str,
}

/// GraphQL-over-HTTP request body.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub variables: SuggestVariables<'a>,
}

impl<'a> GraphQlRequest<'a> {
    pub fn suggest_sem_ver(variables: SuggestVariables<'a>) -> Self {
        Self {
            query: SUGGEST_SEM_VER_MUTATION,
            operation_name: OPERATION_NAME,
            variables,
        }
    }
}

/// Top-level GraphQL error (request-level failure, not the result union).
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub path: Option<Vec<Value>>,
}

impl GraphQlError {
    fn into_message(self) -> OperationMessage {
        let field = self.path.map(|segments| {
            segments
                .iter()
                .map(|segment| match segment {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".")
        });
        OperationMessage {
            kind: Some(GRAPHQL_ERROR_KIND.to_string()),
            message: Some(self.message),
            field,
            code: None,
        }
    }
}

/// The `suggestSemVerViaToken` result union.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SuggestionPayload {
    /// `OperationInfo`: authentication or validation failure.
    MessageList { messages: Vec<OperationMessage> },
    /// `VersionSuggestionError`. The `message` key must be present, but
    /// may be null.
    SingleError {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(deserialize_with = "present_but_nullable")]
        message: Option<String>,
    },
    Success(VersionSuggestion),
}

// With `deserialize_with` and no `default`, a missing key is an error
// rather than `None`, so success payloads never match `SingleError`.
fn present_but_nullable<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

impl SuggestionPayload {
    pub fn into_result(self) -> Result<VersionSuggestion, RemoteFailure> {
        match self {
            SuggestionPayload::MessageList { messages } => Err(RemoteFailure::Messages(messages)),
            SuggestionPayload::SingleError { kind, message } => {
                Err(RemoteFailure::Single { kind, message })
            }
            SuggestionPayload::Success(suggestion) => Ok(suggestion),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuggestData {
    #[serde(rename = "suggestSemVerViaToken", default)]
    pub suggest_sem_ver_via_token: Option<SuggestionPayload>,
}

/// GraphQL-over-HTTP response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<SuggestData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Reduce the response to a suggestion or a rejection.
    ///
    /// Top-level errors take priority over any partial data. Returns `None`
    /// when the response carries neither a payload nor errors.
    pub fn into_outcome(self) -> Option<Result<VersionSuggestion, RemoteFailure>> {
        if !self.errors.is_empty() {
            let messages = self
                .errors
                .into_iter()
                .map(GraphQlError::into_message)
                .collect();
            return Some(Err(RemoteFailure::Messages(messages)));
        }
        self.data
            .and_then(|data| data.suggest_sem_ver_via_token)
            .map(SuggestionPayload::into_result)
    }
}
