//! One remote round trip as data, so the shell can hand the call to another
//! thread and pick the result up later.

use super::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Init,
    Add {
        files: Vec<String>,
        tree: Arc<WorkspaceNode>,
    },
    Commit {
        message: String,
    },
    Status {
        tree: Arc<WorkspaceNode>,
    },
    Log,
    CreateBranch {
        name: String,
    },
    ListBranches,
    Checkout {
        name: String,
    },
    Restore {
        paths: Vec<String>,
    },
    Reset {
        hash: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    Init(Reply<()>),
    Add(Reply<Arc<WorkspaceNode>>),
    Commit(Reply<String>),
    Status(Reply<StatusReport>),
    Log(Reply<Vec<LogEntry>>),
    CreateBranch(Reply<String>),
    ListBranches(Reply<Vec<String>>),
    Checkout(Reply<Arc<WorkspaceNode>>),
    Restore(Reply<RestoreReport>),
    Reset(Reply<Arc<WorkspaceNode>>),
}

impl Request {
    pub fn label(&self) -> &'static str {
        match self {
            Request::Init => "init",
            Request::Add { .. } => "add",
            Request::Commit { .. } => "commit",
            Request::Status { .. } => "status",
            Request::Log => "log",
            Request::CreateBranch { .. } => "branch create",
            Request::ListBranches => "branch list",
            Request::Checkout { .. } => "checkout",
            Request::Restore { .. } => "restore",
            Request::Reset { .. } => "reset",
        }
    }

    /// Performs the call. Blocks for as long as the collaborator does.
    pub fn send(&self, collaborator: &dyn Collaborator, user: &str) -> Response {
        tracing::debug!(request = self.label(), user, "sending kit request");
        match self {
            Request::Init => Response::Init(collaborator.init_repository(user)),
            Request::Add { files, tree } => {
                Response::Add(collaborator.add_files(user, files, tree))
            }
            Request::Commit { message } => Response::Commit(collaborator.commit(user, message)),
            Request::Status { tree } => Response::Status(collaborator.get_status(user, tree)),
            Request::Log => Response::Log(collaborator.get_log(user)),
            Request::CreateBranch { name } => {
                Response::CreateBranch(collaborator.create_branch(user, name))
            }
            Request::ListBranches => Response::ListBranches(collaborator.list_branches(user)),
            Request::Checkout { name } => {
                Response::Checkout(collaborator.checkout_branch(user, name))
            }
            Request::Restore { paths } => {
                Response::Restore(collaborator.restore_files(user, paths))
            }
            Request::Reset { hash } => Response::Reset(collaborator.reset_kit(user, hash)),
        }
    }
}

impl Response {
    pub fn succeeded(&self) -> bool {
        match self {
            Response::Init(r) => r.success,
            Response::Add(r) => r.success,
            Response::Commit(r) => r.success,
            Response::Status(r) => r.success,
            Response::Log(r) => r.success,
            Response::CreateBranch(r) => r.success,
            Response::ListBranches(r) => r.success,
            Response::Checkout(r) => r.success,
            Response::Restore(r) => r.success,
            Response::Reset(r) => r.success,
        }
    }
}
