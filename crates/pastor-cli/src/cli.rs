//! Command-line definitions for the Pastor CLI.

use clap::{ArgAction, Args, Parser, Subcommand};
use pastor_core::VERSION;

/// Pastor - a local, encrypted password store keyed by website domain
#[derive(Parser)]
#[command(name = "pastor")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the password database
    #[arg(short, long, global = true, env = "PASTOR_DATABASE")]
    pub database: Option<String>,

    /// Database passphrase (skips the prompt; visible to other local users)
    #[arg(short, long, global = true)]
    pub password: Option<String>,

    /// Quiet mode (only print requested secrets)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// URL to fetch the password for (shorthand for `pastor fetch URL`)
    #[arg(value_name = "URL")]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new, empty password database
    Create(CreateArgs),

    /// Print the stored password for a URL
    Fetch(FetchArgs),

    /// Store a password you already have for a URL
    Import(ImportArgs),

    /// Generate and store a new password for a URL
    Generate(GenerateArgs),

    /// List the domains that have a stored password
    List,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Replace an existing database file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    /// URL of the site
    #[arg(value_name = "URL")]
    pub url: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// URL of the site
    #[arg(value_name = "URL")]
    pub url: String,

    /// Password to store
    #[arg(value_name = "PASSWORD")]
    pub password: String,

    /// Replace an existing password without asking
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// URL of the site
    #[arg(value_name = "URL")]
    pub url: String,

    /// Replace an existing password without asking
    #[arg(short, long)]
    pub force: bool,

    /// Print the stored password
    #[arg(long)]
    pub print: bool,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

#[derive(Args, Default)]
pub struct GeneratorArgs {
    /// Minimum password length (default 48, or half of --max)
    #[arg(long, value_name = "N")]
    pub min: Option<usize>,

    /// Maximum password length (default 64)
    #[arg(long, value_name = "N")]
    pub max: Option<usize>,

    /// Minimum number of uppercase letters
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub number_of_uppercase: usize,

    /// Minimum number of lowercase letters
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub number_of_lowercase: usize,

    /// Minimum number of digits
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub number_of_digits: usize,

    /// Minimum number of special characters
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub number_of_special_characters: usize,

    /// Use these special characters instead of the default set
    #[arg(long, value_name = "CHARS")]
    pub special_characters: Option<String>,

    /// Do not use digits
    #[arg(long)]
    pub no_digits: bool,

    /// Do not use special characters
    #[arg(long)]
    pub no_special_characters: bool,
}
