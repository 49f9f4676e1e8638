use pastor_core::{generate, normalize_domain, ClassCounts, GeneratorOptions};

use crate::app::AppContext;
use crate::cli::{GenerateArgs, GeneratorArgs};
use crate::config::GeneratorSection;

use super::store_password;

pub fn handle_generate(ctx: &AppContext, args: &GenerateArgs) -> anyhow::Result<()> {
    let domain = normalize_domain(&args.url)?;
    let options = generator_options(&args.generator, &ctx.config()?.generator);

    // Bad generator settings fail before the passphrase prompt.
    let password = generate(&options, &mut rand::thread_rng())?;
    tracing::debug!(length = password.chars().count(), "generated password");

    let database = ctx.unlock()?;
    let outcome = store_password(ctx, database, &domain, &password, args.force)?;

    if args.print && outcome.is_mutation() {
        println!("{}", password.as_str());
    }
    Ok(())
}

/// Merge command-line flags over config defaults.
pub fn generator_options(args: &GeneratorArgs, config: &GeneratorSection) -> GeneratorOptions {
    let (min_length, max_length) =
        resolve_lengths(args.min, args.max, config.min_length, config.max_length);

    GeneratorOptions {
        min_length,
        max_length,
        required: ClassCounts {
            upper: args.number_of_uppercase,
            lower: args.number_of_lowercase,
            digit: args.number_of_digits,
            special: args.number_of_special_characters,
        },
        special_characters: args
            .special_characters
            .clone()
            .or_else(|| config.special_characters.clone()),
        disallow_digits: args.no_digits,
        disallow_special: args.no_special_characters,
    }
}

/// Pick the length range. When a layer sets only a maximum, its minimum
/// is half of it. Flags replace the config layer as a whole.
fn resolve_lengths(
    cli_min: Option<usize>,
    cli_max: Option<usize>,
    config_min: Option<usize>,
    config_max: Option<usize>,
) -> (Option<usize>, Option<usize>) {
    let halve = |min: Option<usize>, max: Option<usize>| match (min, max) {
        (None, Some(max)) => (Some(max / 2), Some(max)),
        other => other,
    };

    if cli_min.is_some() || cli_max.is_some() {
        halve(cli_min, cli_max)
    } else {
        halve(config_min, config_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_max_halves_min() {
        assert_eq!(resolve_lengths(None, Some(20), None, None), (Some(10), Some(20)));
        assert_eq!(resolve_lengths(None, Some(9), None, None), (Some(4), Some(9)));
    }

    #[test]
    fn test_explicit_min_is_kept() {
        assert_eq!(
            resolve_lengths(Some(12), Some(20), None, None),
            (Some(12), Some(20))
        );
        assert_eq!(resolve_lengths(Some(12), None, None, None), (Some(12), None));
    }

    #[test]
    fn test_config_used_without_flags() {
        assert_eq!(
            resolve_lengths(None, None, Some(30), Some(40)),
            (Some(30), Some(40))
        );
        assert_eq!(resolve_lengths(None, None, None, Some(40)), (Some(20), Some(40)));
        assert_eq!(resolve_lengths(None, None, None, None), (None, None));
    }

    #[test]
    fn test_flags_replace_config_lengths() {
        assert_eq!(
            resolve_lengths(None, Some(16), Some(30), Some(40)),
            (Some(8), Some(16))
        );
    }

    #[test]
    fn test_options_from_flags_and_config() {
        let args = GeneratorArgs {
            number_of_digits: 2,
            no_special_characters: true,
            ..Default::default()
        };
        let config = GeneratorSection {
            min_length: None,
            max_length: Some(24),
            special_characters: Some("#$".to_string()),
        };

        let options = generator_options(&args, &config);
        assert_eq!(options.min_length, Some(12));
        assert_eq!(options.max_length, Some(24));
        assert_eq!(options.required.digit, 2);
        assert_eq!(options.special_characters.as_deref(), Some("#$"));
        assert!(options.disallow_special);
        assert!(!options.disallow_digits);
    }

    #[test]
    fn test_generated_password_fits_resolved_bounds() {
        let args = GeneratorArgs {
            max: Some(20),
            ..Default::default()
        };
        let options = generator_options(&args, &GeneratorSection::default());
        let password = generate(&options, &mut rand::thread_rng()).unwrap();
        let len = password.chars().count();
        assert!((10..=20).contains(&len));
    }
}
