//! Envelope and wire payloads exchanged with the Kit engine.

use serde::{Deserialize, Serialize};

use crate::model::WorkspaceNode;

/// Uniform result envelope: `{success, data?, error?}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply<T> {
    pub success: bool,

    #[serde(default)]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Reply<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Success without a payload.
    pub fn done() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result(res: anyhow::Result<T>) -> Self {
        match res {
            Ok(v) => Self::ok(v),
            Err(err) => Self::failure(format!("{:#}", err)),
        }
    }

    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

#[derive(Debug, Serialize)]
pub(super) struct UserBody<'a> {
    pub(super) username: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct AddBody<'a> {
    pub(super) username: &'a str,
    pub(super) files: &'a [String],
    #[serde(rename = "rootFolder")]
    pub(super) root_folder: &'a WorkspaceNode,
}

#[derive(Debug, Serialize)]
pub(super) struct CommitBody<'a> {
    pub(super) username: &'a str,
    pub(super) message: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct StatusBody<'a> {
    pub(super) username: &'a str,
    #[serde(rename = "rootFolder")]
    pub(super) root_folder: &'a WorkspaceNode,
}

#[derive(Debug, Serialize)]
pub(super) struct BranchBody<'a> {
    pub(super) username: &'a str,
    pub(super) branch: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct RestoreBody<'a> {
    pub(super) username: &'a str,
    pub(super) files: &'a [String],
}

#[derive(Debug, Serialize)]
pub(super) struct ResetBody<'a> {
    pub(super) username: &'a str,
    pub(super) hash: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub(super) error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CommitResponse {
    pub(super) hash: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct DataEnvelope<T> {
    pub(super) data: T,
}

#[derive(Debug, Deserialize)]
pub(super) struct LogResponse {
    #[serde(default)]
    pub(super) data: Option<LogData>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct LogData {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub(super) logs: Vec<WireLogEntry>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireLogEntry {
    #[serde(rename = "Hash")]
    pub(super) hash: String,
    #[serde(rename = "Message")]
    pub(super) message: String,
    #[serde(rename = "Author")]
    pub(super) author: String,
    #[serde(rename = "Date")]
    pub(super) date: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct BranchesData {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub(super) branches: Vec<String>,
}
