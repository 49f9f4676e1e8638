use pastor_core::normalize_domain;

use crate::app::AppContext;
use crate::cli::ImportArgs;

use super::store_password;

pub fn handle_import(ctx: &AppContext, args: &ImportArgs) -> anyhow::Result<()> {
    let domain = normalize_domain(&args.url)?;
    let database = ctx.unlock()?;
    store_password(ctx, database, &domain, &args.password, args.force)?;
    Ok(())
}
