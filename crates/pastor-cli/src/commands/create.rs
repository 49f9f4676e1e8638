use pastor_core::{derive_key, Database, PastorError};

use crate::app::AppContext;
use crate::cli::CreateArgs;
use crate::errors::CliError;
use crate::ui::{print_status, Badge, UiContext};

pub fn handle_create(ctx: &AppContext, args: &CreateArgs) -> anyhow::Result<()> {
    let path = ctx.database_path()?;
    if path.exists() && !args.force {
        return Err(already_exists(&path));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let passphrase = ctx.new_passphrase()?;
    let key = derive_key(passphrase.as_bytes());
    let database = match Database::create(&path, key, args.force) {
        Ok(database) => database,
        Err(PastorError::AlreadyExists(path)) => return Err(already_exists(&path)),
        Err(err) => return Err(err.into()),
    };
    let location = database.path().display().to_string();
    database.close()?;

    tracing::info!(path = %location, "created database");
    if !ctx.quiet() {
        print_status(
            &UiContext::from_env(),
            Badge::Ok,
            &format!("Created new database at {}", location),
        );
    }
    Ok(())
}

fn already_exists(path: &std::path::Path) -> anyhow::Error {
    CliError::already_exists(
        format!("A database already exists at {}", path.display()),
        "Pass --force to replace it. Every stored password will be lost.",
    )
    .into()
}
