//! Command handlers, one module per subcommand.

pub mod create;
pub mod fetch;
pub mod generate;
pub mod import;
pub mod list;

pub use create::handle_create;
pub use fetch::handle_fetch;
pub use generate::handle_generate;
pub use import::handle_import;
pub use list::handle_list;

use pastor_core::storage::Force;
use pastor_core::{Database, MergeOutcome, OverwritePolicy};

use crate::app::AppContext;
use crate::helpers::ConfirmOverwrite;
use crate::ui::{print_status, Badge, UiContext};

/// Merge a password into the database, save it and report what happened.
pub(crate) fn store_password(
    ctx: &AppContext,
    mut database: Database,
    domain: &str,
    password: &str,
    force: bool,
) -> anyhow::Result<MergeOutcome> {
    let mut policy: Box<dyn OverwritePolicy> = if force {
        Box::new(Force)
    } else {
        Box::new(ConfirmOverwrite)
    };

    let outcome = database.merge_insert(domain, password, policy.as_mut())?;
    database.close()?;

    if !ctx.quiet() {
        let ui = UiContext::from_env();
        match outcome {
            MergeOutcome::Inserted => {
                print_status(&ui, Badge::Ok, &format!("Stored password for {}", domain))
            }
            MergeOutcome::Replaced => {
                print_status(&ui, Badge::Ok, &format!("Replaced password for {}", domain))
            }
            MergeOutcome::Kept => print_status(
                &ui,
                Badge::Warn,
                &format!("Kept the existing password for {}", domain),
            ),
        }
    }
    Ok(outcome)
}
