//! Random numeric usernames and one-time passwords.

use rand::Rng;
use rand::rngs::OsRng;

/// Length of generated usernames and passwords.
pub const CREDENTIAL_DIGITS: usize = 6;

/// Produces six-digit numeric strings from the OS random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialGenerator;

impl CredentialGenerator {
    /// Creates a new generator.
    pub fn new() -> Self {
        Self
    }

    /// A random username. Leading zeros are kept.
    pub fn username(&self) -> String {
        digits(CREDENTIAL_DIGITS)
    }

    /// A random one-time password, returned to the caller once.
    pub fn password(&self) -> String {
        digits(CREDENTIAL_DIGITS)
    }
}

fn digits(len: usize) -> String {
    let mut rng = OsRng;
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_ascii_digits() {
        let generator = CredentialGenerator::new();
        for _ in 0..100 {
            let value = generator.username();
            assert_eq!(value.len(), 6);
            assert!(value.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_values_vary() {
        let generator = CredentialGenerator::new();
        let samples: std::collections::HashSet<String> =
            (0..50).map(|_| generator.password()).collect();
        assert!(samples.len() > 1);
    }
}
