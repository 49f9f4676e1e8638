use pastor_core::normalize_domain;

use crate::app::AppContext;
use crate::cli::FetchArgs;
use crate::errors::CliError;

pub fn handle_fetch(ctx: &AppContext, args: &FetchArgs) -> anyhow::Result<()> {
    fetch_url(ctx, &args.url)
}

/// Print the password stored for `url`; also backs the bare `pastor URL` form.
pub fn fetch_url(ctx: &AppContext, url: &str) -> anyhow::Result<()> {
    let domain = normalize_domain(url)?;
    let database = ctx.unlock()?;

    match database.lookup(&domain) {
        Some(password) => {
            println!("{}", password.as_str());
            Ok(())
        }
        None => Err(CliError::not_found(
            format!("Could not find a password for {}", domain),
            "Store one with `pastor import` or `pastor generate`.",
        )
        .into()),
    }
}
