use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "pwncmds",
    version,
    long_version = crate::output::render_version(),
    about = "Find Unix commands on this computer that an attacker could exploit"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress the progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// YAML configuration file (default: ./pwncmds.yml if present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Directory of per-command knowledge-base entries
    #[arg(long, global = true)]
    pub gtfobins: Option<String>,

    /// Function catalog file
    #[arg(long, global = true)]
    pub functions: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Show all or specified commands that are available on this computer
    List(ListArgs),
    /// Show exploitation techniques for specified command(s)
    Desc(DescArgs),
    /// Find installed commands supporting every specified function
    Find(FindArgs),
    /// List the known functions
    Functions,
    /// Update command information
    Update,
}

#[derive(Args, Clone)]
pub struct ListArgs {
    /// Specify command(s)
    #[arg(short = 'c', long = "command", num_args = 1..)]
    pub command: Option<Vec<String>>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct DescArgs {
    /// Specify command(s)
    #[arg(short = 'c', long = "command", num_args = 1..)]
    pub command: Option<Vec<String>>,

    /// Specify function(s)
    #[arg(short = 'f', long = "function", num_args = 0..)]
    pub function: Vec<String>,
}

#[derive(Args, Clone)]
pub struct FindArgs {
    /// Specify function(s)
    #[arg(short = 'f', long = "function", num_args = 0..)]
    pub function: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
