//! Core types for strand version suggestion.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Strand unique identifier (`<account>/<name>`).
///
/// Opaque to this crate; the Strands API decides whether it exists.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suid(String);

impl Suid {
    /// Compose a SUID from an account handle and a strand name.
    pub fn new(account: &str, name: &str) -> Self {
        Suid(format!("{}/{}", account, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Suid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A successful version suggestion returned by the Strands API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSuggestion {
    #[serde(rename = "suggestedVersion")]
    pub version: String,
    pub is_breaking: bool,
    pub is_feature: bool,
    pub is_patch: bool,
}

impl VersionSuggestion {
    /// Classify the change. Breaking wins over feature, feature over patch.
    pub fn change_type(&self) -> ChangeType {
        if self.is_breaking {
            ChangeType::Breaking
        } else if self.is_feature {
            ChangeType::Feature
        } else {
            ChangeType::Patch
        }
    }
}

/// Kind of semantic version bump a suggestion represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Breaking,
    Feature,
    Patch,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChangeType::Breaking => "breaking change",
            ChangeType::Feature => "new feature",
            ChangeType::Patch => "patch change",
        };
        f.write_str(label)
    }
}

const NO_MESSAGE: &str = "(no message)";

/// One structured message from an `OperationInfo` rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMessage {
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl fmt::Display for OperationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(kind) = &self.kind {
            write!(f, "[{}] ", kind)?;
        }
        f.write_str(self.message.as_deref().unwrap_or(NO_MESSAGE))?;
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

/// Server-side rejection content, carried through unmodified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteFailure {
    /// `OperationInfo.messages`, or top-level GraphQL errors.
    Messages(Vec<OperationMessage>),
    /// `VersionSuggestionError { type, message }`.
    Single {
        kind: Option<String>,
        message: Option<String>,
    },
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteFailure::Messages(messages) => {
                for (i, message) in messages.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{}", message)?;
                }
                Ok(())
            }
            RemoteFailure::Single { kind, message } => {
                if let Some(kind) = kind {
                    write!(f, "{}: ", kind)?;
                }
                f.write_str(message.as_deref().unwrap_or(NO_MESSAGE))
            }
        }
    }
}
