/// Name of the emulated version-control command namespace.
pub const KIT_NAMESPACE: &str = "kit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDef {
    pub name: &'static str,
    pub usage: &'static str,
    pub help: &'static str,
}

pub const LOCAL_COMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "clear",
        usage: "clear",
        help: "Clear terminal",
    },
    CommandDef {
        name: "pwd",
        usage: "pwd",
        help: "Show current directory",
    },
    CommandDef {
        name: "ls",
        usage: "ls",
        help: "List files",
    },
    CommandDef {
        name: "help",
        usage: "help",
        help: "Show this help",
    },
];

pub const KIT_SUBCOMMANDS: &[CommandDef] = &[
    CommandDef {
        name: "init",
        usage: "kit init",
        help: "Initialize Kit repository",
    },
    CommandDef {
        name: "add",
        usage: "kit add <file>...",
        help: "Add files to staging",
    },
    CommandDef {
        name: "commit",
        usage: "kit commit -m \"message\"",
        help: "Commit staged changes",
    },
    CommandDef {
        name: "status",
        usage: "kit status",
        help: "Show repository status",
    },
    CommandDef {
        name: "log",
        usage: "kit log",
        help: "Show commit history",
    },
    CommandDef {
        name: "branch",
        usage: "kit branch [<name>]",
        help: "List branches, or create one",
    },
    CommandDef {
        name: "checkout",
        usage: "kit checkout <branch>",
        help: "Switch branch",
    },
    CommandDef {
        name: "restore",
        usage: "kit restore [<file>...]",
        help: "Discard working changes (all files if none given)",
    },
    CommandDef {
        name: "reset",
        usage: "kit reset <commit>",
        help: "Move the branch to a commit",
    },
];

pub(super) const KIT_USAGE: &str = "kit <command> [<args>...]";

pub(super) fn kit_def(name: &str) -> Option<&'static CommandDef> {
    KIT_SUBCOMMANDS.iter().find(|d| d.name == name)
}

pub(super) fn kit_usage(name: &str) -> &'static str {
    kit_def(name).map(|d| d.usage).unwrap_or(KIT_USAGE)
}

/// Top-level completion vocabulary: local commands, then `kit <sub>` for every subcommand.
pub(super) fn command_vocabulary() -> Vec<String> {
    LOCAL_COMMANDS
        .iter()
        .map(|d| d.name.to_string())
        .chain(
            KIT_SUBCOMMANDS
                .iter()
                .map(|d| format!("{} {}", KIT_NAMESPACE, d.name)),
        )
        .collect()
}

pub(super) fn help_lines() -> Vec<String> {
    let mut lines = vec!["Available commands:".to_string()];
    for d in LOCAL_COMMANDS.iter().chain(KIT_SUBCOMMANDS) {
        lines.push(format!("  {:<26} - {}", d.usage, d.help));
    }
    lines
}
