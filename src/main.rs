use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kitshell::config::{ConfigOverrides, KitConfig};
use kitshell::remote::HttpCollaborator;
use kitshell::shell::{LineKind, Shell};

#[derive(Parser)]
#[command(name = "kitshell")]
#[command(about = "Kit playground: a workspace explorer and terminal for the Kit engine", long_about = None)]
struct Cli {
    /// JSON config file (defaults to ./kit.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Base URL of the Kit engine API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Workspace owner
    #[arg(long, global = true)]
    user: Option<String>,

    /// Treat the repository as already initialized
    #[arg(long, global = true)]
    initialized: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,

    /// Run command lines in order and print what they produce
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(1);
        }
    }
}

/// Returns `false` when a scripted line produced an error.
fn run() -> Result<bool> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir().context("get current dir")?;
    let cfg = KitConfig::load(
        cli.config.as_deref(),
        &cwd,
        |k| std::env::var(k).ok(),
        ConfigOverrides {
            api_url: cli.api_url,
            username: cli.user,
        },
    )?;

    let _logging = match kitshell::logging::init(&cfg.log_dir) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };

    let collaborator = HttpCollaborator::new(
        &cfg.api_url,
        &cfg.workspace_prefix,
        cfg.request_timeout(),
    )?;
    let user = cfg.username()?;
    tracing::info!(user, api_url = %cfg.api_url, "starting session");
    let shell = Shell::new(user, Arc::new(collaborator)).with_initialized(cli.initialized);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            kitshell::tui::run(shell)?;
            Ok(true)
        }
        Commands::Run { lines } => Ok(run_script(shell, &lines)),
    }
}

fn run_script(mut shell: Shell, lines: &[String]) -> bool {
    let mut clean = true;
    for line in lines {
        let before = shell.scrollback().len();
        shell.submit(line);
        let produced = shell.scrollback().get(before..).unwrap_or_default();
        for l in produced {
            match l.kind {
                LineKind::Error => {
                    clean = false;
                    eprintln!("{}", l.text);
                }
                LineKind::Input | LineKind::Output => println!("{}", l.text),
            }
        }
    }
    clean
}
