//! The remote Kit engine, seen only through its request/response contract.

use std::sync::Arc;

use crate::model::{LogEntry, RestoreReport, StatusReport, WorkspaceNode};

mod exchange;
mod http_client;
mod operations;
mod types;

pub use self::exchange::{Request, Response};
pub use self::http_client::HttpCollaborator;
pub use self::types::Reply;

/// Operations the shell expects from the engine. Implementations never fail
/// out of band: transport problems come back as a failed [`Reply`].
pub trait Collaborator: Send + Sync {
    fn init_repository(&self, user: &str) -> Reply<()>;

    fn add_files(
        &self,
        user: &str,
        files: &[String],
        tree: &WorkspaceNode,
    ) -> Reply<Arc<WorkspaceNode>>;

    /// Returns the new commit hash.
    fn commit(&self, user: &str, message: &str) -> Reply<String>;

    fn get_status(&self, user: &str, tree: &WorkspaceNode) -> Reply<StatusReport>;

    /// Entries in the order the engine keeps them (newest first).
    fn get_log(&self, user: &str) -> Reply<Vec<LogEntry>>;

    fn create_branch(&self, user: &str, name: &str) -> Reply<String>;

    fn list_branches(&self, user: &str) -> Reply<Vec<String>>;

    fn checkout_branch(&self, user: &str, name: &str) -> Reply<Arc<WorkspaceNode>>;

    /// An empty `paths` slice restores everything.
    fn restore_files(&self, user: &str, paths: &[String]) -> Reply<RestoreReport>;

    fn reset_kit(&self, user: &str, hash: &str) -> Reply<Arc<WorkspaceNode>>;
}
