use std::panic::{self, AssertUnwindSafe};

use super::commands::{KIT_NAMESPACE, help_lines};
use super::parse::tokenize;
use super::*;

impl Shell {
    /// Runs `line` to completion, calling the collaborator inline when the
    /// command needs it. Returns `false` if the line was ignored.
    pub fn submit(&mut self, line: &str) -> bool {
        match self.begin(line) {
            Submission::Ignored => false,
            Submission::Completed => true,
            Submission::Remote(request) => {
                let collaborator = Arc::clone(&self.collaborator);
                let user = self.user.clone();
                let sent = panic::catch_unwind(AssertUnwindSafe(|| {
                    request.send(collaborator.as_ref(), &user)
                }));
                match sent {
                    Ok(response) => self.finish(response),
                    Err(_) => self.abort("collaborator panicked"),
                }
                true
            }
        }
    }

    /// Submits the current input line and empties it. A line typed while a
    /// command is running stays in the buffer.
    pub fn submit_buffer(&mut self) -> bool {
        if self.processing {
            return false;
        }
        let line = self.input.take();
        self.submit(&line)
    }

    /// First half of a command: echo, record history, then either handle it
    /// locally or hand back the [`Request`] that must reach the engine.
    pub fn begin(&mut self, line: &str) -> Submission {
        if self.processing {
            tracing::debug!(line, "command in flight; submission ignored");
            return Submission::Ignored;
        }
        let line = line.trim();
        if line.is_empty() {
            return Submission::Ignored;
        }

        self.push_input(format!("{} {}", self.prompt(), line));
        self.input.push_history(line);
        self.processing = true;

        match self.dispatch(line) {
            Ok(Some(request)) => {
                tracing::debug!(request = request.label(), "awaiting kit engine");
                self.pending = Some(request.clone());
                Submission::Remote(request)
            }
            Ok(None) => {
                self.processing = false;
                Submission::Completed
            }
            Err(err) => {
                tracing::debug!(%err, "command rejected");
                self.push_error(err.to_string());
                self.processing = false;
                Submission::Completed
            }
        }
    }

    /// Second half of a remote command: render the engine's answer and apply
    /// any tree it sent back.
    pub fn finish(&mut self, response: Response) {
        match self.pending.take() {
            Some(request) => self.render_response(request, response),
            None => tracing::warn!("kit response arrived with no command pending"),
        }
        self.processing = false;
    }

    /// Gives up on the command in flight, e.g. when the worker running it died.
    pub fn abort(&mut self, reason: &str) {
        if let Some(request) = self.pending.take() {
            tracing::warn!(request = request.label(), reason, "kit command aborted");
        }
        self.push_error(format!("Error executing command: {}", reason));
        self.processing = false;
    }

    fn dispatch(&mut self, line: &str) -> Result<Option<Request>, CommandError> {
        let tokens = tokenize(line);
        let Some((&cmd, args)) = tokens.split_first() else {
            return Ok(None);
        };

        match cmd {
            "clear" => {
                self.scrollback.clear();
                Ok(None)
            }
            "pwd" => {
                self.push_output(format!("/{}", self.tree.name()));
                Ok(None)
            }
            "ls" => {
                let items: Vec<String> = self
                    .tree
                    .visible_children()
                    .map(|n| n.display_name())
                    .collect();
                if items.is_empty() {
                    self.push_output("No files found");
                } else {
                    self.push_output(items.join("  "));
                }
                Ok(None)
            }
            "help" => {
                for l in help_lines() {
                    self.push_output(l);
                }
                Ok(None)
            }
            KIT_NAMESPACE => self.prepare_kit(args).map(Some),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}
