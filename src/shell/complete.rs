use super::commands::{KIT_NAMESPACE, KIT_SUBCOMMANDS, command_vocabulary};
use super::parse::tokenize;
use super::*;

/// Subcommands whose arguments complete against workspace paths.
const PATH_ARG_SUBCOMMANDS: [&str; 2] = ["add", "checkout"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// No candidate, or the buffer is not in a completable shape.
    Unchanged,
    /// Exactly one candidate; the new buffer.
    Replace(String),
    /// Several candidates to show; the buffer stays as it was.
    Candidates(Vec<String>),
}

/// Completion for `buffer`. Pure: reads the vocabularies and `tree`, runs nothing.
pub fn completion(buffer: &str, tree: &WorkspaceTree) -> Completion {
    let tokens = tokenize(buffer);

    match tokens.as_slice() {
        [] => pick(command_vocabulary(), |m| m),
        [word] => pick(
            command_vocabulary()
                .into_iter()
                .filter(|c| c.starts_with(*word))
                .collect(),
            |m| m,
        ),
        [ns, sub] if *ns == KIT_NAMESPACE => pick(
            KIT_SUBCOMMANDS
                .iter()
                .filter(|d| d.name.starts_with(*sub))
                .map(|d| format!("{} {}", KIT_NAMESPACE, d.name))
                .collect(),
            |m| m,
        ),
        [ns, sub, .., last] if *ns == KIT_NAMESPACE && PATH_ARG_SUBCOMMANDS.contains(sub) => {
            let head = &tokens[..tokens.len() - 1];
            pick(
                tree.visible_paths()
                    .into_iter()
                    .filter(|p| p.starts_with(*last))
                    .collect(),
                |m| format!("{} {}", head.join(" "), m),
            )
        }
        _ => Completion::Unchanged,
    }
}

fn pick(matches: Vec<String>, single: impl FnOnce(String) -> String) -> Completion {
    let mut matches = matches;
    match matches.len() {
        0 => Completion::Unchanged,
        1 => Completion::Replace(single(matches.remove(0))),
        _ => Completion::Candidates(matches),
    }
}

impl Shell {
    /// Completes `buffer` and returns the buffer to show. Several candidates
    /// are listed as one output line.
    pub fn request_completion(&mut self, buffer: &str) -> String {
        match completion(buffer, &self.tree) {
            Completion::Unchanged => buffer.to_string(),
            Completion::Replace(next) => next,
            Completion::Candidates(list) => {
                self.push_output(list.join("  "));
                buffer.to_string()
            }
        }
    }

    /// Tab on the shell's own input line.
    pub fn complete(&mut self) {
        let current = self.input.buf().to_string();
        let next = self.request_completion(&current);
        if next != current {
            self.input.set(next);
        }
    }
}

#[cfg(test)]
#[path = "../tests/shell/complete_tests.rs"]
mod tests;
