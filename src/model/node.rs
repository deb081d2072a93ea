use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Reserved system folder kept in storage but hidden from listings and completion.
pub const HIDDEN_FOLDER: &str = ".kit";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// One entry of the workspace tree.
///
/// Folders hold their children behind `Arc` so a tree update only rebuilds the
/// nodes along the edited path; untouched siblings are shared between the old
/// and the new snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceNode {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(
        default,
        deserialize_with = "crate::model::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<Arc<WorkspaceNode>>,

    pub path: String,
}

impl WorkspaceNode {
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            kind: NodeKind::File,
            content: Some(content.into()),
            children: Vec::new(),
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: name.clone(),
            name,
            kind: NodeKind::Folder,
            content: None,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: WorkspaceNode) -> Self {
        let mut child = child;
        child.repath(&self.path);
        self.children.push(Arc::new(child));
        self
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_hidden(&self) -> bool {
        self.name == HIDDEN_FOLDER
    }

    /// Name as shown by `ls`: folders carry a trailing `/`.
    pub fn display_name(&self) -> String {
        match self.kind {
            NodeKind::Folder => format!("{}/", self.name),
            NodeKind::File => self.name.clone(),
        }
    }

    /// Rewrites `path` (and every descendant's) to live under `parent_path`.
    pub(crate) fn repath(&mut self, parent_path: &str) {
        self.path = if parent_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", parent_path, self.name)
        };
        let path = self.path.clone();
        for child in &mut self.children {
            Arc::make_mut(child).repath(&path);
        }
    }
}
