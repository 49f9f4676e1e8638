//! Pastor CLI - a local, single-user encrypted password store
//!
//! This is the command-line interface for Pastor. It resolves paths and
//! passphrases, then hands off to the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod ui;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::app::{take_inline_password, AppContext};
use crate::cli::{Cli, Commands};
use crate::constants::LOG_ENV;
use crate::errors::{exit_code_for, hint_for, CliError};
use crate::ui::{print_error, UiContext};

fn main() {
    let mut cli = Cli::parse();
    init_tracing(cli.verbose);
    let inline_password = take_inline_password(&mut cli);

    // The context holds the passphrase; drop it before `exit` skips destructors.
    let result = {
        let ctx = AppContext::new(&cli, inline_password);
        run(&ctx, &cli)
    };

    if let Err(e) = result {
        let code = exit_code_for(&e);
        tracing::debug!(code, error = ?e, "command failed");
        print_error(&UiContext::from_env(), &e.to_string(), hint_for(&e).as_deref());
        std::process::exit(code);
    }
}

/// Log to stderr. `PASTOR_LOG` takes an `EnvFilter` directive; otherwise
/// each `-v` raises the level one step from `warn`.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Create(args)) => commands::handle_create(ctx, args),
        Some(Commands::Fetch(args)) => commands::handle_fetch(ctx, args),
        Some(Commands::Import(args)) => commands::handle_import(ctx, args),
        Some(Commands::Generate(args)) => commands::handle_generate(ctx, args),
        Some(Commands::List) => commands::handle_list(ctx),
        None => match cli.url.as_deref() {
            Some(url) => commands::fetch::fetch_url(ctx, url),
            None => {
                let _ = Cli::command().print_help();
                Err(CliError::invalid_input("Pass a URL to fetch, or a command").into())
            }
        },
    }
}
