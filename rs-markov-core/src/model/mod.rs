//! Top-level module for the trigram generation system.
//!
//! This crate provides a second-order Markov chain text generator, including:
//! - Trigram entries (`Trigram`)
//! - A persistent associative store (`ModelStore`)
//! - A high-level training/generation interface (`MarkovChain`)

/// High-level interface for training a trigram model and generating text.
///
/// Exposes training from text or streams, randomized generation walks
/// with dead-end recovery, and deterministic seeding for tests.
pub mod chain;

/// Persistent store mapping prefix keys to trigram entries.
///
/// Supports loading a JSON snapshot from disk, atomic whole-file
/// persistence, and count/inspection queries.
pub mod store;

/// Internal representation of a single trigram entry (two-word prefix).
///
/// Tracks observed successor words and supports uniform random sampling.
pub mod trigram;
