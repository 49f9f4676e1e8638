//! Password generation under character-class constraints.
//!
//! A password is built in a fixed-length buffer. Required characters of each
//! class are scattered by forward-scan placement: pick a random slot and
//! walk forward (wrapping) to the first empty one. A slot right after an
//! occupied one is up to twice as likely to be picked, which is accepted in
//! exchange for linear running time. The remaining slots are filled from the
//! pool of every enabled class.

use rand::Rng;
use zeroize::Zeroizing;

use crate::error::{PastorError, Result};

/// Minimum length used when the caller gives none.
pub const DEFAULT_MIN_LENGTH: usize = 48;

/// Maximum length used when the caller gives none.
pub const DEFAULT_MAX_LENGTH: usize = 64;

/// Special characters used when the caller gives none.
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "<>[](){}~&\"!?%/";

/// Capacity of a custom special character set, in characters.
pub const MAX_SPECIAL_CHARACTERS: usize = 255;

/// Longest password the generator will build.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Minimum number of characters required from each class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub upper: usize,
    pub lower: usize,
    pub digit: usize,
    pub special: usize,
}

impl ClassCounts {
    /// Sum of all per-class minimums, or `None` if it overflows.
    pub fn total(&self) -> Option<usize> {
        self.upper
            .checked_add(self.lower)?
            .checked_add(self.digit)?
            .checked_add(self.special)
    }
}

/// Parameters for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Shortest acceptable password, defaults to [`DEFAULT_MIN_LENGTH`]
    pub min_length: Option<usize>,

    /// Longest acceptable password, defaults to [`DEFAULT_MAX_LENGTH`]
    pub max_length: Option<usize>,

    /// Per-class minimums
    pub required: ClassCounts,

    /// Custom special character set; `None` or empty uses the default set
    pub special_characters: Option<String>,

    /// Leave digits out of the password entirely
    pub disallow_digits: bool,

    /// Leave special characters out of the password entirely
    pub disallow_special: bool,
}

impl GeneratorOptions {
    /// Resolve the inclusive length range.
    ///
    /// The minimum is raised to cover every required character. An explicit
    /// maximum is never raised: requirements that do not fit are an error
    /// rather than silently stretched.
    ///
    /// # Errors
    ///
    /// Returns `PastorError::LengthInfeasible` if the range is empty or
    /// reaches past [`MAX_PASSWORD_LENGTH`].
    pub fn length_bounds(&self) -> Result<(usize, usize)> {
        let total = self.required.total().ok_or_else(|| {
            PastorError::LengthInfeasible("required character counts are too large".to_string())
        })?;
        let min = total.max(self.min_length.unwrap_or(DEFAULT_MIN_LENGTH)).max(1);
        let max = match self.max_length {
            Some(max) => max,
            None => total.max(DEFAULT_MAX_LENGTH),
        };

        if max < min {
            return Err(PastorError::LengthInfeasible(format!(
                "need at least {} characters but the maximum is {}",
                min, max
            )));
        }
        if max > MAX_PASSWORD_LENGTH {
            return Err(PastorError::LengthInfeasible(format!(
                "passwords are limited to {} characters, {} requested",
                MAX_PASSWORD_LENGTH, max
            )));
        }
        Ok((min, max))
    }

    fn check_conflicts(&self) -> Result<()> {
        if self.disallow_digits && self.required.digit > 0 {
            return Err(PastorError::ConfigConflict(
                "digits cannot be both disallowed and required".to_string(),
            ));
        }
        if self.disallow_special && self.required.special > 0 {
            return Err(PastorError::ConfigConflict(
                "special characters cannot be both disallowed and required".to_string(),
            ));
        }
        Ok(())
    }

    fn special_pool(&self) -> Result<Vec<char>> {
        let custom = match self.special_characters.as_deref() {
            Some(chars) if !chars.is_empty() => chars,
            _ => return Ok(DEFAULT_SPECIAL_CHARACTERS.chars().collect()),
        };

        let pool: Vec<char> = custom.chars().collect();
        if pool.len() > MAX_SPECIAL_CHARACTERS {
            return Err(PastorError::TooManySpecialChars {
                count: pool.len(),
                limit: MAX_SPECIAL_CHARACTERS,
            });
        }
        if pool.iter().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(PastorError::InvalidInput(
                "special characters cannot include whitespace or control characters"
                    .to_string(),
            ));
        }
        Ok(pool)
    }
}

/// Generate a password satisfying `options`.
///
/// # Errors
///
/// - `PastorError::ConfigConflict` if a class is both required and disallowed
/// - `PastorError::TooManySpecialChars` if the custom set is over capacity
/// - `PastorError::LengthInfeasible` if the requirements do not fit
///
/// # Examples
///
/// ```
/// use pastor_core::generator::{generate, ClassCounts, GeneratorOptions};
///
/// let options = GeneratorOptions {
///     min_length: Some(10),
///     max_length: Some(10),
///     required: ClassCounts { digit: 10, ..Default::default() },
///     ..Default::default()
/// };
/// let password = generate(&options, &mut rand::thread_rng()).unwrap();
/// assert!(password.chars().all(|c| c.is_ascii_digit()));
/// ```
pub fn generate<R: Rng + ?Sized>(
    options: &GeneratorOptions,
    rng: &mut R,
) -> Result<Zeroizing<String>> {
    options.check_conflicts()?;

    let lower: Vec<char> = LOWERCASE.chars().collect();
    let upper: Vec<char> = UPPERCASE.chars().collect();
    let digits: Vec<char> = DIGITS.chars().collect();
    let specials = options.special_pool()?;

    let mut valid = Vec::with_capacity(lower.len() + upper.len() + digits.len() + specials.len());
    valid.extend_from_slice(&lower);
    valid.extend_from_slice(&upper);
    if !options.disallow_digits {
        valid.extend_from_slice(&digits);
    }
    if !options.disallow_special {
        valid.extend_from_slice(&specials);
    }

    let (min, max) = options.length_bounds()?;
    let length = if min == max {
        min
    } else {
        rng.gen_range(min..=max)
    };

    let mut slots = Slots::new(length);
    let required = options.required;
    for (pool, count) in [
        (&upper, required.upper),
        (&lower, required.lower),
        (&digits, required.digit),
        (&specials, required.special),
    ] {
        for _ in 0..count {
            let c = pool[rng.gen_range(0..pool.len())];
            slots.place_forward(c, rng);
        }
    }
    slots.fill_empty(&valid, rng);

    tracing::debug!(length, "generated password");
    Ok(slots.into_password())
}

/// Fixed-length password buffer with an occupancy map.
struct Slots {
    chars: Zeroizing<Vec<char>>,
    filled: Vec<bool>,
}

impl Slots {
    fn new(length: usize) -> Self {
        Self {
            chars: Zeroizing::new(vec!['\0'; length]),
            filled: vec![false; length],
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    /// Index of the first empty slot at or after `start`, wrapping around.
    fn next_empty_from(&self, start: usize) -> Option<usize> {
        (0..self.len())
            .map(|offset| (start + offset) % self.len())
            .find(|&index| !self.filled[index])
    }

    /// Place `c` by forward probing from a random slot.
    fn place_forward<R: Rng + ?Sized>(&mut self, c: char, rng: &mut R) {
        let start = rng.gen_range(0..self.len());
        if let Some(index) = self.next_empty_from(start) {
            self.chars[index] = c;
            self.filled[index] = true;
        }
    }

    fn fill_empty<R: Rng + ?Sized>(&mut self, pool: &[char], rng: &mut R) {
        for index in 0..self.len() {
            if !self.filled[index] {
                self.chars[index] = pool[rng.gen_range(0..pool.len())];
                self.filled[index] = true;
            }
        }
    }

    fn into_password(self) -> Zeroizing<String> {
        Zeroizing::new(self.chars.iter().collect())
    }
}
