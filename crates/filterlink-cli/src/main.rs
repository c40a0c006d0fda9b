use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use filterlink_cli::cli::{load_core_config, CliCommand, Driver, Fixture};
use filterlink_core::models::{ChatId, FilterId};
use filterlink_core::tracing_setup::init_tracing;

#[derive(Parser)]
#[command(name = "filterlink-cli")]
#[command(about = "Manage shareable folder invite links against a session fixture")]
struct Cli {
    /// Session fixture (chats, filters, links) as JSON
    #[arg(long, short = 'f')]
    fixture: PathBuf,

    /// Path to JSON config file (defaults to the user config dir)
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Write the server state back to the fixture after the command
    #[arg(long)]
    save: bool,

    /// Pretty-print JSON output
    #[arg(long, short)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the invite links of a folder
    List {
        /// Chat filter ID
        filter: FilterId,
    },

    /// Create a new link with every shareable chat of the folder
    Export {
        /// Chat filter ID
        filter: FilterId,
    },

    /// Open a link's chat editor, toggle chats and optionally save
    Edit {
        /// Chat filter ID
        filter: FilterId,
        /// Row index in the link list
        row: usize,
        /// Chat to toggle (can be specified multiple times)
        #[arg(long, short = 't')]
        toggle: Vec<ChatId>,
        /// Save the selection
        #[arg(long)]
        commit: bool,
    },

    /// Set a link's title
    Rename {
        /// Chat filter ID
        filter: FilterId,
        /// Row index in the link list
        row: usize,
        /// New title, at most 32 characters
        title: String,
    },

    /// Revoke a link
    Delete {
        /// Chat filter ID
        filter: FilterId,
        /// Row index in the link list
        row: usize,
        /// Confirm the deletion
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show a link's context menu
    Menu {
        /// Chat filter ID
        filter: FilterId,
        /// Row index in the link list
        row: usize,
        /// Menu entry to activate
        #[arg(long)]
        pick: Option<usize>,
    },

    /// List the chats a link admits
    Chats {
        /// Chat filter ID
        filter: FilterId,
        /// Row index in the link list
        row: usize,
    },
}

impl From<Commands> for CliCommand {
    fn from(command: Commands) -> Self {
        match command {
            Commands::List { filter } => CliCommand::List { filter_id: filter },
            Commands::Export { filter } => CliCommand::Export { filter_id: filter },
            Commands::Edit {
                filter,
                row,
                toggle,
                commit,
            } => CliCommand::Edit {
                filter_id: filter,
                row,
                toggles: toggle,
                commit,
            },
            Commands::Rename { filter, row, title } => CliCommand::Rename {
                filter_id: filter,
                row,
                title,
            },
            Commands::Delete { filter, row, yes } => CliCommand::Delete {
                filter_id: filter,
                row,
                confirm: yes,
            },
            Commands::Menu { filter, row, pick } => CliCommand::Menu {
                filter_id: filter,
                row,
                pick,
            },
            Commands::Chats { filter, row } => CliCommand::Chats {
                filter_id: filter,
                row,
            },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_tracing("warn") {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_core_config(cli.config.as_deref())?;
    let fixture = Fixture::load(&cli.fixture)?;

    let output = {
        let driver = Driver::start(config, fixture)?;
        let output = driver.execute(cli.command.into())?;
        if cli.save {
            driver.fixture().save(&cli.fixture)?;
        }
        output
    };

    let text = if cli.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
