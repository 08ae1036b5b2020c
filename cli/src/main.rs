mod command;
mod render;
mod session;

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tasklist_core::{Config, TaskService, TaskStore};

use crate::session::Session;

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Named task lists in a terminal session", long_about = None)]
struct Cli {
    /// Path to config.json (default: ~/.tasklist/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Fail on out-of-range positions instead of skipping them
    #[arg(long, global = true)]
    strict: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Read commands from stdin, one per line (default)
    Shell,
    /// Execute a command script and exit
    Run {
        /// Script file, one session command per line
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config)?;
    if cli.strict {
        config.strict_offsets = true;
    }
    init_logging(&config, cli.verbose);

    let service = TaskService::with_options(TaskStore::new(), config.service_options());
    let stdout = io::stdout();
    let mut session = Session::new(
        service,
        config.show_incomplete_only,
        stdout.lock(),
        io::stderr(),
    );

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            session.run_interactive(stdin.lock(), prompt)?;
        }
        Commands::Run { file } => {
            let script = File::open(&file)
                .with_context(|| format!("Failed to open script {}", file.display()))?;
            session.run_script(BufReader::new(script))?;
        }
    }
    Ok(())
}

/// `RUST_LOG` wins; otherwise `-v` flags, then the configured level.
fn init_logging(config: &Config, verbose: u8) {
    let level = match verbose {
        0 => config.log_level.as_str(),
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
