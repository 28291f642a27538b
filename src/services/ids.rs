//! Book id generation

use rand::Rng;

/// URL-safe alphabet used for generated ids
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Source of fresh book ids
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random fixed-length ids drawn from a thread-local CSPRNG
#[derive(Debug, Clone)]
pub struct NanoIdGenerator {
    length: usize,
}

impl NanoIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl IdGenerator for NanoIdGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
