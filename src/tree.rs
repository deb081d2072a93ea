//! In-memory workspace tree.
//!
//! The tree is an immutable snapshot: every mutation returns a new
//! [`WorkspaceTree`] that shares untouched subtrees with the old one, so a
//! reader holding the previous snapshot never sees a half-applied edit.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::model::{NodeKind, WorkspaceNode};

mod lookup;
mod mutate;
mod walk;

pub use self::mutate::NodePatch;
pub use self::walk::VisibleEntry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no such file or folder: {0}")]
    NotFound(String),
    #[error("not a folder: {0}")]
    NotAFolder(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid name: {0:?}")]
    InvalidName(String),
    #[error("the workspace root cannot be removed or renamed")]
    RootImmutable,
    #[error("folders have no content: {0}")]
    FolderContent(String),
    #[error("file has children: {0}")]
    FileWithChildren(String),
    #[error("inconsistent path {found:?} (expected {expected:?})")]
    PathMismatch { expected: String, found: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkspaceTree {
    root: Arc<WorkspaceNode>,
}

impl WorkspaceTree {
    /// Fresh workspace for `user`: a root folder named after the user holding a README.
    pub fn seeded(user: &str) -> Self {
        let readme = WorkspaceNode::file(
            "README.md",
            format!(
                "# {}'s Repository\n\nWelcome to your Kit repository!",
                user
            ),
        );
        Self {
            root: Arc::new(WorkspaceNode::folder(user).with_child(readme)),
        }
    }

    pub fn from_root(root: impl Into<Arc<WorkspaceNode>>) -> Result<Self, TreeError> {
        let root = root.into();
        validate_root(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &WorkspaceNode {
        &self.root
    }

    pub fn root_arc(&self) -> Arc<WorkspaceNode> {
        Arc::clone(&self.root)
    }

    /// Name of the workspace, i.e. the root folder's name.
    pub fn name(&self) -> &str {
        &self.root.name
    }

    /// Wholesale substitution; the previous snapshot is dropped without reconciliation.
    pub fn replace(&mut self, root: Arc<WorkspaceNode>) -> Result<(), TreeError> {
        validate_root(&root)?;
        self.root = root;
        Ok(())
    }
}

pub(crate) fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(TreeError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn validate_root(root: &WorkspaceNode) -> Result<(), TreeError> {
    if root.kind != NodeKind::Folder {
        return Err(TreeError::NotAFolder(root.path.clone()));
    }
    validate_children(root)
}

pub(crate) fn validate_children(node: &WorkspaceNode) -> Result<(), TreeError> {
    if node.kind == NodeKind::File {
        if !node.children.is_empty() {
            return Err(TreeError::FileWithChildren(node.path.clone()));
        }
        return Ok(());
    }

    let mut seen = HashSet::new();
    for child in &node.children {
        validate_name(&child.name)?;
        let expected = format!("{}/{}", node.path, child.name);
        if child.path != expected {
            return Err(TreeError::PathMismatch {
                expected,
                found: child.path.clone(),
            });
        }
        if !seen.insert(child.name.as_str()) {
            return Err(TreeError::AlreadyExists(child.path.clone()));
        }
        validate_children(child)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/tree/tree_tests.rs"]
mod tests;
