//! Password and salt generation.

use crate::charset::Alphabet;
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng, RngCore};

/// Salt length in characters.
pub const SALT_LENGTH: usize = 8;

/// Draws passwords and salts from a cryptographically secure generator.
///
/// Every position is an independent, uniform draw over the alphabet
/// entries (duplicates included).
#[derive(Debug)]
pub struct PasswordGenerator<R = OsRng> {
    rng: R,
    salt_alphabet: Alphabet,
}

impl PasswordGenerator<OsRng> {
    /// Generator backed by the operating system.
    pub fn from_os() -> Self {
        Self::new(OsRng)
    }
}

impl<R: RngCore + CryptoRng> PasswordGenerator<R> {
    /// Generator backed by `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            salt_alphabet: Alphabet::salt(),
        }
    }

    /// A password of `length` characters from `alphabet`.
    pub fn password(&mut self, alphabet: &Alphabet, length: usize) -> String {
        sample(&mut self.rng, alphabet, length)
    }

    /// A fresh salt.
    pub fn salt(&mut self) -> String {
        sample(&mut self.rng, &self.salt_alphabet, SALT_LENGTH)
    }
}

fn sample<R: RngCore + CryptoRng>(rng: &mut R, alphabet: &Alphabet, length: usize) -> String {
    let chars = alphabet.as_slice();
    (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())])
        .collect()
}
