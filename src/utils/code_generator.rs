//! Short code generation.
//!
//! Codes are [`CODE_LENGTH`] characters drawn independently and uniformly from
//! the 62-symbol [`ALPHABET`]. Generation says nothing about uniqueness;
//! collisions are handled by
//! [`crate::application::services::UniquenessResolver`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// Number of characters in a generated short code.
pub const CODE_LENGTH: usize = 6;

/// Base-62 alphabet used for short codes.
pub const ALPHABET: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Top-level path segments that a short code must never shadow.
pub const RESERVED_CODES: &[&str] = &["api", "health", "static"];

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code.
    fn generate(&self) -> String;
}

/// [`CodeGenerator`] backed by a [`StdRng`].
///
/// Production code seeds it from the OS; tests use [`Self::seeded`] to get a
/// reproducible sequence.
pub struct RandomCodeGenerator {
    rng: Mutex<StdRng>,
}

impl RandomCodeGenerator {
    /// Creates a generator seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    /// Creates a deterministic generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        (0..CODE_LENGTH)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

/// Returns true if `code` looks like a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}

/// Returns true if `code` collides with a fixed route segment.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_has_62_unique_symbols() {
        let unique: HashSet<_> = ALPHABET.iter().collect();
        assert_eq!(unique.len(), 62);
        assert!(ALPHABET.iter().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_has_correct_length() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..100 {
            assert_eq!(generator.generate().len(), CODE_LENGTH);
        }
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        let generator = RandomCodeGenerator::new();
        for _ in 0..1000 {
            let code = generator.generate();
            assert!(is_valid_code(&code), "unexpected code {code}");
        }
    }

    #[test]
    fn test_seeded_generator_is_deterministic() {
        let a = RandomCodeGenerator::seeded(42);
        let b = RandomCodeGenerator::seeded(42);

        let first: Vec<String> = (0..5).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..5).map(|_| b.generate()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = RandomCodeGenerator::seeded(1);
        let b = RandomCodeGenerator::seeded(2);

        let first: Vec<String> = (0..5).map(|_| a.generate()).collect();
        let second: Vec<String> = (0..5).map(|_| b.generate()).collect();

        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_code_produces_distinct_codes() {
        let generator = RandomCodeGenerator::seeded(7);
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 1000 draws from 62^6 values; a repeat would point at a broken RNG.
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("Ab3dE9"));
        assert!(!is_valid_code("Ab3dE"));
        assert!(!is_valid_code("Ab3dE9x"));
        assert!(!is_valid_code("Ab-dE9"));
        assert!(!is_valid_code(""));
    }

    #[test]
    fn test_reserved_codes() {
        assert!(is_reserved("health"));
        assert!(is_reserved("static"));
        assert!(is_reserved("api"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("Ab3dE9"));
    }
}
