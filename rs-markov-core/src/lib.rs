//! Second-order Markov chain text generation library.
//!
//! This crate provides a trigram-based generation system including:
//! - Trigram entries (two-word prefix, observed successor words)
//! - A persistent model store with a JSON snapshot on disk
//! - Training from raw text or an already-opened byte stream
//! - Randomized generation walks with an injectable, seedable RNG
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core trigram model, training and generation logic.
///
/// This module exposes the chain and store interfaces while keeping
/// internal helpers private.
pub mod model;

/// Error taxonomy shared by all fallible operations.
pub mod error;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;
