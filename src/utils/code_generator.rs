//! Slug and admin key generation.
//!
//! Both identifiers are drawn from the same 62-character alphanumeric alphabet
//! using the operating system CSPRNG.

/// Alphabet shared by slugs and admin keys.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Sentinel prefix that separates slugs from the fixed system routes.
pub const SLUG_SENTINEL: char = '!';

/// Number of random characters following the sentinel.
pub const SLUG_LENGTH: usize = 5;

/// Length of an admin key.
pub const ADMIN_KEY_LENGTH: usize = 64;

/// Largest multiple of the alphabet size that fits in a byte (4 * 62).
/// Bytes at or above this value are rejected so every symbol is equally likely.
const REJECTION_BOUND: u8 = 248;

/// The system random source could not be read.
#[derive(Debug, thiserror::Error)]
#[error("random source unavailable: {0}")]
pub struct RandomSourceError(#[from] getrandom::Error);

/// Generates `n` characters, each drawn uniformly from [`ALPHABET`].
///
/// # Errors
///
/// Returns [`RandomSourceError`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let s = generate(12)?;
/// assert_eq!(s.len(), 12);
/// assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate(n: usize) -> Result<String, RandomSourceError> {
    let mut out = String::with_capacity(n);
    // Roughly 3% of bytes get rejected, so a small overshoot avoids most refills.
    let mut buffer = vec![0u8; n + n / 8 + 8];

    while out.len() < n {
        getrandom::fill(&mut buffer)?;

        for &byte in buffer.iter().filter(|&&b| b < REJECTION_BOUND) {
            if out.len() == n {
                break;
            }
            out.push(ALPHABET[(byte % 62) as usize] as char);
        }
    }

    Ok(out)
}

/// Generates a fresh slug: the sentinel followed by [`SLUG_LENGTH`] random characters.
///
/// # Errors
///
/// Returns [`RandomSourceError`] if the system random number generator fails.
pub fn generate_slug() -> Result<String, RandomSourceError> {
    let body = generate(SLUG_LENGTH)?;
    Ok(format!("{SLUG_SENTINEL}{body}"))
}

/// Generates a fresh [`ADMIN_KEY_LENGTH`]-character admin key.
///
/// # Errors
///
/// Returns [`RandomSourceError`] if the system random number generator fails.
pub fn generate_admin_key() -> Result<String, RandomSourceError> {
    generate(ADMIN_KEY_LENGTH)
}

/// Returns `true` if `slug` can address a record: non-empty and not the bare sentinel.
pub fn is_addressable_slug(slug: &str) -> bool {
    !slug.is_empty() && slug != "!"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_exact_length() {
        for n in [0, 1, 5, 64, 500] {
            assert_eq!(generate(n).unwrap().len(), n);
        }
    }

    #[test]
    fn test_generate_uses_only_alphabet() {
        let s = generate(2_000).unwrap();
        assert!(s.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_generate_covers_whole_alphabet() {
        let s = generate(20_000).unwrap();
        let seen: HashSet<u8> = s.bytes().collect();
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn test_generate_is_roughly_uniform() {
        let s = generate(62_000).unwrap();
        let mut counts: HashMap<u8, usize> = HashMap::new();
        for b in s.bytes() {
            *counts.entry(b).or_default() += 1;
        }

        // Expected 1000 per symbol; bounds are far outside normal variance.
        for (&symbol, &count) in &counts {
            assert!(
                (700..1300).contains(&count),
                "symbol {} appeared {} times",
                symbol as char,
                count
            );
        }
    }

    #[test]
    fn test_generate_slug_format() {
        for _ in 0..200 {
            let slug = generate_slug().unwrap();
            assert!(slug.starts_with(SLUG_SENTINEL));
            let body = &slug[1..];
            assert_eq!(body.len(), SLUG_LENGTH);
            assert!(body.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_admin_key_format() {
        let key = generate_admin_key().unwrap();
        assert_eq!(key.len(), ADMIN_KEY_LENGTH);
        assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_admin_keys_are_unique() {
        let keys: HashSet<String> = (0..1000).map(|_| generate_admin_key().unwrap()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_is_addressable_slug() {
        assert!(is_addressable_slug("!abc12"));
        assert!(is_addressable_slug("anything"));
        assert!(!is_addressable_slug(""));
        assert!(!is_addressable_slug("!"));
    }
}
