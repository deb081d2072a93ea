//! The Kit command interpreter and the session state it drives.
//!
//! A submitted line either runs locally (`clear`, `pwd`, `ls`, `help`) or
//! becomes a [`Request`] for the remote engine. Remote commands are split in
//! two halves, [`Shell::begin`] and [`Shell::finish`], so an embedding surface
//! can run the call elsewhere; [`Shell::submit`] does both in one go.

use std::sync::Arc;

use thiserror::Error;

use crate::model::WorkspaceNode;
use crate::remote::{Collaborator, Request, Response};
use crate::tree::{NodePatch, TreeError, WorkspaceTree};

mod commands;
mod complete;
mod dispatch;
mod input;
mod kit_prepare;
mod kit_render;
mod parse;
mod scrollback;

pub use self::commands::{CommandDef, KIT_NAMESPACE, KIT_SUBCOMMANDS, LOCAL_COMMANDS};
pub use self::complete::{Completion, completion};
pub use self::input::{HISTORY_LIMIT, Input};
pub use self::scrollback::{LineKind, LineTag, Scrollback, ScrollbackLine};

pub const DEFAULT_BRANCH: &str = "main";

/// Everything that can go wrong with one command. Each variant renders as a
/// single error line; none of them ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Not a Kit repository. Run \"kit init\" first.")]
    NotInitialized,

    #[error("Kit repository already initialized")]
    AlreadyInitialized,

    #[error("Command not found: {0}. Type 'help' for available commands.")]
    UnknownCommand(String),

    #[error("{context}: {message}")]
    Collaborator {
        context: &'static str,
        message: String,
    },
}

/// What [`Shell::begin`] did with a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Nothing happened: the line was blank or a command is still running.
    Ignored,
    /// Handled without the remote engine.
    Completed,
    /// Waiting on the engine; hand the response to [`Shell::finish`].
    Remote(Request),
}

pub struct Shell {
    user: String,
    collaborator: Arc<dyn Collaborator>,

    tree: WorkspaceTree,
    scrollback: Scrollback,
    input: Input,

    initialized: bool,
    current_branch: String,
    processing: bool,
    pending: Option<Request>,
}

impl Shell {
    pub fn new(user: impl Into<String>, collaborator: Arc<dyn Collaborator>) -> Self {
        let user = user.into();
        let mut shell = Self {
            tree: WorkspaceTree::seeded(&user),
            user,
            collaborator,
            scrollback: Scrollback::default(),
            input: Input::default(),
            initialized: false,
            current_branch: DEFAULT_BRANCH.to_string(),
            processing: false,
            pending: None,
        };
        shell.push_output("Welcome to Kit Terminal! Type \"help\" for available commands.");
        shell
    }

    /// Seeds the cached repository flag, e.g. when the workspace is known to exist remotely.
    pub fn with_initialized(mut self, initialized: bool) -> Self {
        self.initialized = initialized;
        self
    }

    pub fn with_tree(mut self, tree: WorkspaceTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn prompt(&self) -> String {
        format!("{}@kit:~$", self.user)
    }

    pub fn collaborator(&self) -> Arc<dyn Collaborator> {
        Arc::clone(&self.collaborator)
    }

    pub fn tree(&self) -> &WorkspaceTree {
        &self.tree
    }

    pub fn scrollback(&self) -> &[ScrollbackLine] {
        self.scrollback.lines()
    }

    /// Submitted lines, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.input.history()
    }

    pub fn history_cursor(&self) -> Option<usize> {
        self.input.history_pos()
    }

    pub fn buffer(&self) -> &str {
        self.input.buf()
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    /// Direct edits to the input line. Any of them ends history recall.
    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    pub fn current_branch(&self) -> &str {
        &self.current_branch
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    pub fn pending_request(&self) -> Option<&Request> {
        self.pending.as_ref()
    }

    pub fn recall_up(&mut self) {
        self.input.history_up();
    }

    pub fn recall_down(&mut self) {
        self.input.history_down();
    }

    // Editing-surface operations on the tree.

    pub fn create_file(&mut self, parent_path: &str, name: &str) -> Result<(), TreeError> {
        self.tree = self
            .tree
            .insert_child(parent_path, WorkspaceNode::file(name, ""))?;
        tracing::debug!(parent = parent_path, name, "created file");
        Ok(())
    }

    pub fn create_folder(&mut self, parent_path: &str, name: &str) -> Result<(), TreeError> {
        self.tree = self
            .tree
            .insert_child(parent_path, WorkspaceNode::folder(name))?;
        tracing::debug!(parent = parent_path, name, "created folder");
        Ok(())
    }

    pub fn update_node(&mut self, path: &str, patch: NodePatch) -> Result<(), TreeError> {
        self.tree = self.tree.update_by_path(path, patch)?;
        Ok(())
    }

    pub fn delete_node(&mut self, path: &str) -> Result<(), TreeError> {
        self.tree = self.tree.delete_by_path(path)?;
        tracing::debug!(path, "deleted node");
        Ok(())
    }

    pub fn replace_tree(&mut self, root: Arc<WorkspaceNode>) -> Result<(), TreeError> {
        self.tree.replace(root)?;
        tracing::info!(root = %self.tree.root().path, "workspace tree replaced");
        Ok(())
    }

    // Scrollback helpers.

    pub(crate) fn push_input(&mut self, text: impl Into<String>) {
        self.scrollback.push(LineKind::Input, text, None);
    }

    pub(crate) fn push_output(&mut self, text: impl Into<String>) {
        self.scrollback.push(LineKind::Output, text, None);
    }

    pub(crate) fn push_tagged(&mut self, text: impl Into<String>, tag: LineTag) {
        self.scrollback.push(LineKind::Output, text, Some(tag));
    }

    pub(crate) fn push_error(&mut self, msg: impl Into<String>) {
        self.scrollback.push(LineKind::Error, msg, None);
    }
}

#[cfg(test)]
#[path = "tests/shell/shell_tests.rs"]
mod tests;
