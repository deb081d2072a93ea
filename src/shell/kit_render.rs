use crate::model::{LogEntry, RestoreReport, StatusReport};
use crate::remote::Reply;

use super::*;

const NO_CHANGES: &str = "nothing to commit, working tree clean";
const LOG_SEPARATOR: &str = "---";

fn collaborator_error<T>(context: &'static str, reply: &Reply<T>) -> CommandError {
    CommandError::Collaborator {
        context,
        message: reply.error_text().to_string(),
    }
}

impl Shell {
    pub(super) fn render_response(&mut self, request: Request, response: Response) {
        tracing::debug!(
            request = request.label(),
            success = response.succeeded(),
            "kit engine replied"
        );
        let outcome = match (request, response) {
            (Request::Init, Response::Init(reply)) => self.on_init(reply),
            (Request::Add { files, .. }, Response::Add(reply)) => self.on_add(&files, reply),
            (Request::Commit { message }, Response::Commit(reply)) => {
                self.on_commit(&message, reply)
            }
            (Request::Status { .. }, Response::Status(reply)) => self.on_status(reply),
            (Request::Log, Response::Log(reply)) => self.on_log(reply),
            (Request::ListBranches, Response::ListBranches(reply)) => self.on_branches(reply),
            (Request::CreateBranch { name }, Response::CreateBranch(reply)) => {
                self.on_branch_created(&name, reply)
            }
            (Request::Checkout { name }, Response::Checkout(reply)) => {
                self.on_checkout(name, reply)
            }
            (Request::Restore { .. }, Response::Restore(reply)) => self.on_restore(reply),
            (Request::Reset { hash }, Response::Reset(reply)) => self.on_reset(&hash, reply),
            (request, _) => {
                tracing::warn!(request = request.label(), "mismatched kit response");
                Err(CommandError::Collaborator {
                    context: "Error executing command",
                    message: format!("unexpected response to {}", request.label()),
                })
            }
        };
        if let Err(err) = outcome {
            self.push_error(err.to_string());
        }
    }

    fn on_init(&mut self, reply: Reply<()>) -> Result<(), CommandError> {
        if !reply.success {
            self.initialized = false;
            return Err(collaborator_error(
                "Failed to initialize Kit repository",
                &reply,
            ));
        }
        self.initialized = true;
        self.push_output("Initialized empty Kit repository");
        Ok(())
    }

    fn on_add(
        &mut self,
        files: &[String],
        reply: Reply<Arc<WorkspaceNode>>,
    ) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to add files", &reply));
        }
        for f in files {
            self.push_tagged(format!("Staged {}", f), LineTag::Staged);
        }
        Ok(())
    }

    fn on_commit(&mut self, message: &str, reply: Reply<String>) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to commit changes", &reply));
        }
        match reply.data.filter(|h| !h.is_empty()) {
            Some(hash) => self.push_output(format!("[{} {}] {}", self.current_branch, hash, message)),
            None => self.push_output(format!("Committed changes: {}", message)),
        }
        Ok(())
    }

    fn on_status(&mut self, reply: Reply<StatusReport>) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to get status", &reply));
        }
        let Some(report) = reply.data else {
            self.push_output(NO_CHANGES);
            return Ok(());
        };
        if let Some(branch) = report.branch.as_deref().filter(|b| !b.is_empty()) {
            self.current_branch = branch.to_string();
        }

        let sections: [(&str, &[String], LineTag, &str); 4] = [
            ("Deleted files:", report.deleted.as_slice(), LineTag::Deleted, "deleted:   "),
            ("Changes to be committed:", report.staged.as_slice(), LineTag::Staged, "staged:    "),
            (
                "Changes not staged for commit:",
                report.modified.as_slice(),
                LineTag::Modified,
                "modified:  ",
            ),
            ("Untracked files:", report.untracked.as_slice(), LineTag::Untracked, ""),
        ];
        for (header, paths, tag, label) in sections {
            if paths.is_empty() {
                continue;
            }
            self.push_output(header);
            for p in paths {
                self.push_tagged(format!("  {}{}", label, p), tag);
            }
        }
        Ok(())
    }

    fn on_log(&mut self, reply: Reply<Vec<LogEntry>>) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to get log", &reply));
        }
        for entry in reply.data.unwrap_or_default() {
            self.push_tagged(format!("commit {}", entry.hash), LineTag::CommitHeader);
            self.push_tagged(format!("Author: {}", entry.author), LineTag::Author);
            self.push_tagged(format!("Date:   {}", entry.date), LineTag::Date);
            self.push_tagged(format!("    {}", entry.message), LineTag::Message);
            self.push_output(LOG_SEPARATOR);
        }
        Ok(())
    }

    fn on_branches(&mut self, reply: Reply<Vec<String>>) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to list branches", &reply));
        }
        for branch in reply.data.unwrap_or_default() {
            let marker = if branch == self.current_branch { "*" } else { " " };
            self.push_output(format!("{} {}", marker, branch));
        }
        Ok(())
    }

    fn on_branch_created(&mut self, name: &str, reply: Reply<String>) -> Result<(), CommandError> {
        if !reply.success {
            return Err(collaborator_error("Failed to create branch", &reply));
        }
        self.push_output(format!("Created branch '{}'", name));
        Ok(())
    }

    fn on_checkout(
        &mut self,
        name: String,
        reply: Reply<Arc<WorkspaceNode>>,
    ) -> Result<(), CommandError> {
        const CONTEXT: &str = "Failed to switch branch";
        if !reply.success {
            return Err(collaborator_error(CONTEXT, &reply));
        }
        let Some(root) = reply.data else {
            return Err(CommandError::Collaborator {
                context: CONTEXT,
                message: "no workspace tree returned".to_string(),
            });
        };
        self.replace_tree(root)
            .map_err(|err| CommandError::Collaborator {
                context: CONTEXT,
                message: err.to_string(),
            })?;
        self.push_output(format!("Switched to branch '{}'", name));
        self.current_branch = name;
        Ok(())
    }

    fn on_restore(&mut self, reply: Reply<RestoreReport>) -> Result<(), CommandError> {
        let failure = (!reply.success).then(|| collaborator_error("Failed to restore files", &reply));
        let report = reply.data.unwrap_or_default();

        for file in &report.files {
            if file.restored {
                self.push_output(format!("Restored {}", file.path));
            } else {
                self.push_error(format!("Failed to restore {}", file.path));
            }
        }
        if let Some(root) = report.file_system {
            self.replace_tree(root)
                .map_err(|err| CommandError::Collaborator {
                    context: "Failed to restore files",
                    message: err.to_string(),
                })?;
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn on_reset(
        &mut self,
        hash: &str,
        reply: Reply<Arc<WorkspaceNode>>,
    ) -> Result<(), CommandError> {
        const CONTEXT: &str = "Failed to reset";
        if !reply.success {
            return Err(collaborator_error(CONTEXT, &reply));
        }
        if let Some(root) = reply.data {
            self.replace_tree(root)
                .map_err(|err| CommandError::Collaborator {
                    context: CONTEXT,
                    message: err.to_string(),
                })?;
        }
        self.push_output(format!("HEAD is now at {}", hash));
        Ok(())
    }
}
