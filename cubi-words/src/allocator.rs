//! Rig identifier allocation.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, warn};

use cubi_core::constants::DEFAULT_MAX_ID_ATTEMPTS;
use cubi_core::error::{CubiError, Result};

use crate::sample::create_identifier;
use crate::wordlist::WordList;

/// Draws word identifiers until one can be claimed.
///
/// The RNG is seeded once and shared behind a mutex; tests inject a seeded
/// generator through [`IdAllocator::with_rng`].
pub struct IdAllocator<R = StdRng> {
    words: WordList,
    id_len: usize,
    max_attempts: usize,
    rng: Mutex<R>,
}

impl IdAllocator<StdRng> {
    /// Creates an allocator seeded from system entropy.
    pub fn new(words: WordList, id_len: usize) -> Result<Self> {
        Self::with_rng(words, id_len, StdRng::from_entropy())
    }
}

impl<R: RngCore + Send> IdAllocator<R> {
    /// Creates an allocator drawing from `rng`.
    ///
    /// Fails if `id_len` is zero or the list holds fewer than `id_len` words.
    pub fn with_rng(words: WordList, id_len: usize, rng: R) -> Result<Self> {
        if id_len == 0 {
            return Err(CubiError::ConfigError("identifier word count must be at least 1".into()));
        }
        if words.len() < id_len {
            return Err(CubiError::InsufficientPopulation {
                requested: id_len,
                available: words.len(),
            });
        }

        Ok(Self {
            words,
            id_len,
            max_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            rng: Mutex::new(rng),
        })
    }

    /// Sets how many candidates [`IdAllocator::allocate`] tries.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Returns the number of words per identifier.
    pub fn id_len(&self) -> usize {
        self.id_len
    }

    /// Returns the word population.
    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Draws one candidate identifier.
    pub fn create_identifier(&self) -> Result<String> {
        let mut rng = self.rng.lock();
        create_identifier(&mut *rng, self.words.as_slice(), self.id_len)
    }

    /// Draws candidates until `claim` accepts one.
    ///
    /// `claim` returns true once it has taken the candidate (typically by
    /// inserting it into the store if absent). Gives up with
    /// [`CubiError::AllocationExhausted`] after the configured number of
    /// attempts.
    pub fn allocate<F>(&self, mut claim: F) -> Result<String>
    where
        F: FnMut(&str) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            let candidate = self.create_identifier()?;
            if claim(&candidate) {
                if attempt > 1 {
                    debug!(attempt, id = %candidate, "Allocated identifier after collisions");
                }
                return Ok(candidate);
            }
        }

        warn!(attempts = self.max_attempts, "Identifier space exhausted");
        Err(CubiError::AllocationExhausted {
            attempts: self.max_attempts,
        })
    }
}
