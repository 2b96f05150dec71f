//! # ethercubi identifiers
//!
//! Rig identifiers are a few distinct words drawn at random from a word list
//! and joined with `-`, e.g. `copper-lantern-oasis`.
//!
//! - [`WordList`]: the population, loaded once at startup
//! - [`sample`] / [`create_identifier`]: the drawing itself, over any RNG
//! - [`IdAllocator`]: draws candidates until one can be claimed
//!
//! ## Example
//!
//! ```rust
//! use cubi_words::{IdAllocator, WordList};
//!
//! let words = WordList::parse("alpha\nbravo\ncharlie\ndelta\n");
//! let allocator = IdAllocator::new(words, 2).unwrap();
//! let id = allocator.allocate(|_| true).unwrap();
//! assert_eq!(id.split('-').count(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod allocator;
mod sample;
mod wordlist;

pub use allocator::IdAllocator;
pub use sample::{create_identifier, sample};
pub use wordlist::WordList;
