use crate::generators::traits::ValueGenerator;
use rand::seq::IndexedRandom;

pub const DEFAULT_CODE_LENGTH: usize = 6;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default code strategy: `length` characters drawn uniformly from
/// uppercase ASCII letters and digits.
///
/// `rand::rng()` is a ChaCha-based CSPRNG reseeded from the OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphanumericGenerator;

impl ValueGenerator for AlphanumericGenerator {
    type Args = usize;
    type Value = String;

    fn generate(&self, length: &usize) -> String {
        let mut rng = rand::rng();
        (0..*length)
            .filter_map(|_| CODE_ALPHABET.choose(&mut rng))
            .map(|&b| char::from(b))
            .collect()
    }
}
