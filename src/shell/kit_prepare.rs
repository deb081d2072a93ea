use super::commands::{KIT_USAGE, kit_def, kit_usage};
use super::parse::commit_message;
use super::*;

/// Subcommands allowed before `kit init`. `checkout` is left to the engine,
/// which refuses it when no repository exists.
const UNGATED: [&str; 2] = ["init", "checkout"];

impl Shell {
    /// Validates a `kit` command line and builds the request for it. Usage and
    /// precondition failures never reach the engine.
    pub(super) fn prepare_kit(&self, args: &[&str]) -> Result<Request, CommandError> {
        let Some((&sub, rest)) = args.split_first() else {
            return Err(CommandError::Usage(KIT_USAGE));
        };
        if kit_def(sub).is_none() {
            return Err(CommandError::UnknownCommand(sub.to_string()));
        }
        if !self.initialized && !UNGATED.contains(&sub) {
            return Err(CommandError::NotInitialized);
        }

        let usage = || CommandError::Usage(kit_usage(sub));
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let request = match sub {
            "init" => {
                if self.initialized {
                    return Err(CommandError::AlreadyInitialized);
                }
                Request::Init
            }
            "add" => {
                if rest.is_empty() {
                    return Err(usage());
                }
                Request::Add {
                    files: owned(rest),
                    tree: self.tree.root_arc(),
                }
            }
            "commit" => {
                let [flag, words @ ..] = rest else {
                    return Err(usage());
                };
                if *flag != "-m" || words.is_empty() {
                    return Err(usage());
                }
                let message = commit_message(words);
                if message.trim().is_empty() {
                    return Err(usage());
                }
                Request::Commit { message }
            }
            "status" => Request::Status {
                tree: self.tree.root_arc(),
            },
            "log" => Request::Log,
            "branch" => match rest {
                [] => Request::ListBranches,
                [name] => Request::CreateBranch {
                    name: name.to_string(),
                },
                _ => return Err(usage()),
            },
            "checkout" => match rest {
                [name] => Request::Checkout {
                    name: name.to_string(),
                },
                _ => return Err(usage()),
            },
            "restore" => Request::Restore {
                paths: owned(rest),
            },
            "reset" => match rest {
                [hash] => Request::Reset {
                    hash: hash.to_string(),
                },
                _ => return Err(usage()),
            },
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(request)
    }
}
