use clap::{Parser, Subcommand, ValueEnum};

/// One line of session input.
#[derive(Parser, Debug)]
#[command(name = "tasklist", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Show all lists
    Lists,
    /// Create a list (and select it if none is selected)
    NewList {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Rename the list at a position
    Rename {
        position: usize,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        name: Vec<String>,
    },
    /// Delete lists by position
    RmLists {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Move lists so they sit before the list currently at --to
    MvLists {
        #[arg(required = true)]
        positions: Vec<usize>,
        #[arg(long)]
        to: usize,
    },
    /// Select the list to work on
    Use { position: usize },
    /// Add a task (usage: add Buy milk due:tomorrow notes:"2 litres")
    Add {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Show tasks of the selected list
    Show {
        /// Only incomplete tasks
        #[arg(long, conflicts_with = "all")]
        incomplete: bool,
        /// Every task, regardless of the filter setting
        #[arg(long)]
        all: bool,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Set the default filter for `show`
    Filter { state: FilterState },
    /// Delete tasks by position in the full list
    Rm {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Move tasks so they sit before the task currently at --to
    Mv {
        #[arg(required = true)]
        positions: Vec<usize>,
        #[arg(long)]
        to: usize,
    },
    /// Toggle completion of the task at a position in the current view
    Toggle { position: usize },
    /// Complete every task, or reopen them all if all are done
    ToggleAll,
    /// Edit a task (usage: edit 0 New title due:none notes:"call first")
    Edit {
        position: usize,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterState {
    On,
    Off,
}
