use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::node::WorkspaceNode;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub deleted: Vec<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub staged: Vec<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub modified: Vec<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub untracked: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRestore {
    pub path: String,
    pub restored: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreReport {
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub files: Vec<FileRestore>,

    #[serde(rename = "fileSystem", default, skip_serializing_if = "Option::is_none")]
    pub file_system: Option<Arc<WorkspaceNode>>,
}
