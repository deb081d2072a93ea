//! Terminal front end: a workspace explorer next to the Kit terminal.
//!
//! Remote commands run on a worker thread; the UI keeps drawing and hands the
//! response back to the shell when it arrives.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::shell::{Input, Shell, Submission};

mod event_loop;
mod explorer;
mod render;
mod runtime;
mod worker;

use self::explorer::EditPrompt;
use self::worker::{Poll, Worker};

pub use self::runtime::run;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Focus {
    Explorer,
    Terminal,
}

pub(crate) struct App {
    shell: Shell,
    focus: Focus,
    selected: usize,
    prompt: Option<EditPrompt>,
    notice: Option<String>,
    worker: Worker,
    quit: bool,
}

impl App {
    pub(crate) fn new(shell: Shell) -> Self {
        Self {
            shell,
            focus: Focus::Terminal,
            selected: 0,
            prompt: None,
            notice: None,
            worker: Worker::default(),
            quit: false,
        }
    }

    pub(crate) fn shell(&self) -> &Shell {
        &self.shell
    }

    /// Enter on the terminal line. While a command is running the line stays
    /// in the buffer untouched.
    pub(crate) fn submit_input(&mut self) {
        if self.shell.is_processing() {
            return;
        }
        let line = self.shell.input_mut().take();
        if let Submission::Remote(request) = self.shell.begin(&line) {
            let collaborator = self.shell.collaborator();
            let user = self.shell.user().to_string();
            if let Err(err) = self.worker.spawn(request, collaborator, user) {
                self.shell.abort(&format!("{:#}", err));
            }
        }
        self.clamp_selection();
    }

    /// Picks up a finished remote command, if any.
    pub(crate) fn pump(&mut self) {
        match self.worker.poll() {
            Poll::Idle | Poll::Pending => return,
            Poll::Done(response) => self.shell.finish(response),
            Poll::Lost => self.shell.abort("worker thread stopped"),
        }
        self.clamp_selection();
    }
}

#[cfg(test)]
#[path = "tests/tui/app_tests.rs"]
mod tests;
