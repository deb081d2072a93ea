//! Endpoint mapping for [`HttpCollaborator`].

use anyhow::{Context, Result};

use super::http_client::parse;
use super::types::{
    AddBody, BranchBody, BranchesData, CommitBody, CommitResponse, DataEnvelope, LogResponse,
    ResetBody, RestoreBody, StatusBody, UserBody,
};
use super::*;

impl Collaborator for HttpCollaborator {
    fn init_repository(&self, user: &str) -> Reply<()> {
        Reply::from_result(
            self.post("/init", &UserBody { username: user }, "init")
                .map(|_| ()),
        )
    }

    fn add_files(
        &self,
        user: &str,
        files: &[String],
        tree: &WorkspaceNode,
    ) -> Reply<Arc<WorkspaceNode>> {
        let body = AddBody {
            username: user,
            files,
            root_folder: tree,
        };
        Reply::from_result(
            self.post("/add", &body, "add")
                .map(|_| Arc::new(tree.clone())),
        )
    }

    fn commit(&self, user: &str, message: &str) -> Reply<String> {
        Reply::from_result(self.commit_hash(user, message))
    }

    fn get_status(&self, user: &str, tree: &WorkspaceNode) -> Reply<StatusReport> {
        match self.status_report(user, tree) {
            Ok(Some(report)) => Reply::ok(report),
            Ok(None) => Reply::done(),
            Err(err) => Reply::failure(format!("{:#}", err)),
        }
    }

    fn get_log(&self, user: &str) -> Reply<Vec<LogEntry>> {
        Reply::from_result(self.log_entries(user))
    }

    fn create_branch(&self, user: &str, name: &str) -> Reply<String> {
        let body = BranchBody {
            username: user,
            branch: name,
        };
        Reply::from_result(
            self.post("/branch", &body, "branch")
                .map(|_| format!("Created branch '{}'", name)),
        )
    }

    fn list_branches(&self, user: &str) -> Reply<Vec<String>> {
        Reply::from_result(self.branch_names(user))
    }

    fn checkout_branch(&self, user: &str, name: &str) -> Reply<Arc<WorkspaceNode>> {
        Reply::from_result(self.checkout_tree(user, name))
    }

    fn restore_files(&self, user: &str, paths: &[String]) -> Reply<RestoreReport> {
        Reply::from_result(self.restore_report(user, paths))
    }

    fn reset_kit(&self, user: &str, hash: &str) -> Reply<Arc<WorkspaceNode>> {
        Reply::from_result(self.reset_tree(user, hash))
    }
}

impl HttpCollaborator {
    fn commit_hash(&self, user: &str, message: &str) -> Result<String> {
        let body = CommitBody {
            username: user,
            message,
        };
        let raw = self.post("/commit", &body, "commit")?;
        let resp: CommitResponse = parse(&raw, "commit")?;
        Ok(resp.hash)
    }

    /// `None` when the engine has nothing to report (empty or `null` body).
    fn status_report(&self, user: &str, tree: &WorkspaceNode) -> Result<Option<StatusReport>> {
        let body = StatusBody {
            username: user,
            root_folder: tree,
        };
        let raw = self.post("/status", &body, "status")?;
        let raw = raw.trim();
        if raw.is_empty() || raw == "null" {
            return Ok(None);
        }
        parse(raw, "status").map(Some)
    }

    fn log_entries(&self, user: &str) -> Result<Vec<LogEntry>> {
        let raw = self.post("/log", &UserBody { username: user }, "log")?;
        let resp: LogResponse = parse(&raw, "log")?;
        Ok(log_from_wire(resp))
    }

    fn branch_names(&self, user: &str) -> Result<Vec<String>> {
        let raw = self.get("/branches", &[("username", user)], "branches")?;
        let resp: DataEnvelope<BranchesData> = parse(&raw, "branches")?;
        Ok(resp.data.branches)
    }

    fn checkout_tree(&self, user: &str, name: &str) -> Result<Arc<WorkspaceNode>> {
        let body = BranchBody {
            username: user,
            branch: name,
        };
        let raw = self.post("/checkout", &body, "checkout")?;
        let resp: DataEnvelope<DataEnvelope<WorkspaceNode>> = parse(&raw, "checkout")?;
        let root = unwrap_workspace_root(resp.data.data, self.workspace_prefix(), user)?;
        Ok(Arc::new(root))
    }

    fn restore_report(&self, user: &str, paths: &[String]) -> Result<RestoreReport> {
        let body = RestoreBody {
            username: user,
            files: paths,
        };
        let raw = self.post("/restore", &body, "restore")?;
        let resp: DataEnvelope<RestoreReport> = parse(&raw, "restore")?;
        let mut report = resp.data;
        if let Some(fs) = report.file_system.take() {
            let root =
                unwrap_workspace_root(Arc::unwrap_or_clone(fs), self.workspace_prefix(), user)?;
            report.file_system = Some(Arc::new(root));
        }
        Ok(report)
    }

    fn reset_tree(&self, user: &str, hash: &str) -> Result<Arc<WorkspaceNode>> {
        let body = ResetBody {
            username: user,
            hash,
        };
        let raw = self.post("/reset", &body, "reset")?;
        let resp: DataEnvelope<WorkspaceNode> = parse(&raw, "reset")?;
        let root = unwrap_workspace_root(resp.data, self.workspace_prefix(), user)?;
        Ok(Arc::new(root))
    }
}

/// Trims messages and turns `2025-01-02T03:04:05Z` into `2025-01-02 03:04:05`.
fn log_from_wire(resp: LogResponse) -> Vec<LogEntry> {
    resp.data
        .unwrap_or_default()
        .logs
        .into_iter()
        .map(|l| LogEntry {
            hash: l.hash,
            message: l.message.trim().to_string(),
            author: l.author,
            date: l.date.replacen('T', " ", 1).replace('Z', ""),
        })
        .collect()
}

/// The engine answers with its on-disk layout: paths carry
/// `<prefix>/<user>/` and the user's folder sits one level below the
/// returned root. Hands back the user's folder with clean paths.
pub(crate) fn unwrap_workspace_root(
    root: WorkspaceNode,
    prefix: &str,
    user: &str,
) -> Result<WorkspaceNode> {
    let root = if prefix.is_empty() {
        root
    } else {
        strip_path_prefix(root, &format!("{}/{}/", prefix, user))
    };
    if root.path == user {
        return Ok(root);
    }
    let first = root
        .children
        .into_iter()
        .next()
        .context("invalid repo structure")?;
    Ok(Arc::unwrap_or_clone(first))
}

fn strip_path_prefix(node: WorkspaceNode, prefix: &str) -> WorkspaceNode {
    let WorkspaceNode {
        name,
        kind,
        content,
        children,
        path,
    } = node;
    let path = match path.strip_prefix(prefix) {
        Some(rest) => rest.to_string(),
        None => path,
    };
    let children = children
        .into_iter()
        .map(|c| Arc::new(strip_path_prefix(Arc::unwrap_or_clone(c), prefix)))
        .collect();
    WorkspaceNode {
        name,
        kind,
        content,
        children,
        path,
    }
}

#[cfg(test)]
#[path = "../tests/remote/operations_tests.rs"]
mod tests;
