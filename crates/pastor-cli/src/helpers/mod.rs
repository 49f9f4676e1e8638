//! Input helper functions for the CLI: passphrase prompting and overwrite
//! confirmation.

mod input;

pub use input::{passphrase_from_env, prompt_new_passphrase, prompt_passphrase, ConfirmOverwrite};
