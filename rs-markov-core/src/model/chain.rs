use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{MarkovError, Result};
use crate::io;
use crate::model::store::ModelStore;

/// Number of generation steps when the caller does not ask for one.
pub const DEFAULT_LENGTH: usize = 20;

/// Second-order Markov chain over a persistent trigram store.
///
/// # Responsibilities
/// - Train the model from raw text, a byte stream, or a file
/// - Persist the store after every successful training pass
/// - Generate word sequences by a randomized walk with dead-end recovery
///
/// # Notes
/// - The randomness source is owned by the chain and injected at
///   construction; `with_seed` gives deterministic walks for tests.
/// - The chain holds the single model instance of the process. It does
///   no internal locking; concurrent use must be serialized by the
///   caller (the server wraps it in a `Mutex`).
#[derive(Debug)]
pub struct MarkovChain {
	store: ModelStore,
	trained: bool,
	rng: StdRng,
}

impl MarkovChain {
	/// Creates a chain over the given store with an OS-seeded RNG.
	///
	/// A store loaded from a non-empty snapshot counts as already
	/// trained; a fresh store starts untrained.
	pub fn new(store: ModelStore) -> Self {
		Self::with_rng(store, StdRng::from_os_rng())
	}

	/// Creates a chain with a deterministic RNG seed.
	pub fn with_seed(store: ModelStore, seed: u64) -> Self {
		Self::with_rng(store, StdRng::seed_from_u64(seed))
	}

	fn with_rng(store: ModelStore, rng: StdRng) -> Self {
		let trained = !store.is_empty();
		Self { store, trained, rng }
	}

	/// Whether a training pass has completed (or a non-empty snapshot
	/// was loaded at construction).
	pub fn is_trained(&self) -> bool {
		self.trained
	}

	/// Number of distinct prefix keys in the model.
	pub fn count(&self) -> usize {
		self.store.count()
	}

	/// Read-only access to the underlying store, for inspection.
	pub fn store(&self) -> &ModelStore {
		&self.store
	}

	/// Trains the model from raw text and persists the store.
	///
	/// The text is normalized (literal `"..."` sequences and newlines
	/// removed), split into sentences on `'.'`, and each sentence split
	/// into words on `' '`. Every 3-word window `(w0, w1, w2)` records
	/// `w2` as a successor of the prefix `(w0, w1)` under the key
	/// `w0 + w1`.
	///
	/// The trained flag is cleared on entry and only set again once the
	/// snapshot has been persisted, so a failed call leaves the chain
	/// untrained even if it held data before.
	///
	/// # Errors
	/// - [`MarkovError::FormatText`] if the text splits into fewer than
	///   2 period-delimited segments. The store and the snapshot are
	///   left untouched in that case.
	/// - I/O or JSON errors if persisting the snapshot fails.
	///
	/// # Notes
	/// - A sentence with fewer than 3 words stops the whole pass; every
	///   sentence after it is discarded, well-formed or not. This
	///   matches the reference behavior (see DESIGN.md), so training is
	///   sensitive to sentence order.
	/// - Words are whatever `' '`-splitting yields, empty tokens
	///   included; no trimming is applied.
	pub fn train(&mut self, text: &str) -> Result<()> {
		self.trained = false;

		let cleaned = clean_text(text);
		let sentences: Vec<&str> = cleaned.split('.').collect();
		if sentences.len() < 2 {
			return Err(MarkovError::FormatText);
		}

		for sentence in &sentences {
			let words: Vec<&str> = sentence.split(' ').collect();
			if words.len() < 3 {
				break;
			}
			for window in words.windows(3) {
				let key = format!("{}{}", window[0], window[1]);
				self.store
					.entry_or_insert(key, window[0], window[1])
					.add(window[2]);
			}
		}

		self.store.persist()?;
		self.trained = true;
		Ok(())
	}

	/// Trains from an externally-opened byte stream, fully read and
	/// decoded as UTF-8 before processing.
	///
	/// # Errors
	/// Fails like [`Self::train`], or with an I/O error if reading the
	/// stream fails.
	pub fn train_reader<R: Read>(&mut self, reader: R) -> Result<()> {
		let text = io::read_stream(reader)?;
		self.train(&text)
	}

	/// Trains from a text file read fully into memory.
	///
	/// # Errors
	/// Fails like [`Self::train`], or with an I/O error if the file
	/// cannot be read.
	pub fn train_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
		let text = io::read_file(path)?;
		self.train(&text)
	}

	/// Generates a space-joined word sequence of roughly `length` words.
	///
	/// The walk seeds itself with the prefix pair of a uniformly random
	/// entry, then repeatedly keys the store with the last two emitted
	/// words and samples one successor uniformly from the entry found.
	/// A dead end (absent key) recovers by re-seeding with a new random
	/// entry, which appends two words instead of one; the result may
	/// therefore exceed `length`.
	///
	/// At least the two seed words are emitted, even for `length <= 1`.
	///
	/// # Errors
	/// Returns [`MarkovError::NotTrained`] if no successful training
	/// pass has completed, or if the model holds no entries to walk.
	pub fn generate(&mut self, length: usize) -> Result<String> {
		if !self.trained {
			return Err(MarkovError::NotTrained);
		}
		let keys = self.store.keys();
		if keys.is_empty() {
			return Err(MarkovError::NotTrained);
		}

		let mut sentence: Vec<String> = Vec::new();

		// Should not panic, the keys come from the store's own enumeration
		let seed_key = keys[self.rng.random_range(0..keys.len())];
		let prefix = self.store.get(seed_key).unwrap().prefix_words();
		sentence.push(prefix[0].clone());
		sentence.push(prefix[1].clone());

		for i in 1..length {
			let key = format!("{}{}", sentence[i - 1], sentence[i]);
			// Uniform over the current suffix list; duplicates carry
			// their observed weight
			let next = self
				.store
				.get(&key)
				.and_then(|entry| entry.sample(&mut self.rng));
			match next {
				Some(choice) => sentence.push(choice.to_owned()),
				None => {
					// Dead end: re-seed and emit both prefix words
					let seed_key = keys[self.rng.random_range(0..keys.len())];
					let prefix = self.store.get(seed_key).unwrap().prefix_words();
					sentence.push(prefix[0].clone());
					sentence.push(prefix[1].clone());
				}
			}
		}

		Ok(sentence.join(" "))
	}
}

/// Strips literal ellipsis sequences and newlines.
///
/// A textual substitution, not sentence-boundary detection.
fn clean_text(text: &str) -> String {
	text.replace("...", "").replace('\n', "")
}

#[cfg(test)]
mod tests {
	use super::*;

	const FIRST_TEXT: &str = "Uno dos tres cuatro. Cinco Seis Siete Ocho.";
	const SECOND_TEXT: &str = "Nueve diez once doce. Trece catorce quince dieciseis.";

	fn chain_in(dir: &tempfile::TempDir) -> MarkovChain {
		let store = ModelStore::open(dir.path().join("Model.json")).unwrap();
		MarkovChain::with_seed(store, 42)
	}

	#[test]
	fn training_valid_text_populates_the_store() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		assert!(chain.count() > 0);
		assert!(chain.is_trained());
	}

	#[test]
	fn training_without_periods_fails_and_persists_nothing() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Model.json");
		let mut chain = chain_in(&dir);

		let result = chain.train("there is no period in this text");
		assert!(matches!(result, Err(MarkovError::FormatText)));
		assert!(!chain.is_trained());
		assert!(!path.exists());
	}

	#[test]
	fn failed_training_untrains_a_previously_trained_chain() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		assert!(chain.is_trained());

		let result = chain.train("still no period");
		assert!(matches!(result, Err(MarkovError::FormatText)));
		assert!(!chain.is_trained());
		// The entries themselves are stale but untouched
		assert!(chain.count() > 0);
	}

	#[test]
	fn training_twice_grows_the_key_count() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		let first_count = chain.count();
		chain.train(SECOND_TEXT).unwrap();
		assert!(chain.count() > first_count);
	}

	#[test]
	fn a_short_sentence_discards_everything_after_it() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		// The second sentence has 2 words; the well-formed third one
		// must be ignored as well
		chain
			.train("Uno dos tres cuatro. No. Cinco seis siete ocho nueve.")
			.unwrap();
		assert_eq!(chain.count(), 2);
		assert!(chain.store().get("Unodos").is_some());
		assert!(chain.store().get("dostres").is_some());
	}

	#[test]
	fn ellipsis_and_newlines_are_stripped_before_splitting() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train("Uno dos tres...\ncuatro. Cinco Seis Siete Ocho.").unwrap();
		// "tres...\ncuatro" collapses into the single word "trescuatro"
		assert_eq!(chain.store().get("Unodos").unwrap().suffixes(), ["trescuatro"]);
	}

	#[test]
	fn generation_before_training_fails() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		let result = chain.generate(DEFAULT_LENGTH);
		assert!(matches!(result, Err(MarkovError::NotTrained)));
	}

	#[test]
	fn generation_emits_more_words_than_the_requested_length() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		let text = chain.generate(DEFAULT_LENGTH).unwrap();
		// 2-word seed plus one or two words per step
		assert!(text.split(' ').count() > DEFAULT_LENGTH);
	}

	#[test]
	fn generation_emits_at_least_the_two_seed_words() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		for length in [0, 1] {
			let text = chain.generate(length).unwrap();
			assert_eq!(text.split(' ').count(), 2);
		}
	}

	#[test]
	fn generation_only_emits_observed_words() {
		let dir = tempfile::tempdir().unwrap();
		let mut chain = chain_in(&dir);

		chain.train(FIRST_TEXT).unwrap();
		let trained: Vec<&str> = FIRST_TEXT
			.split(['.', ' '])
			.collect();
		let text = chain.generate(10).unwrap();
		for word in text.split(' ') {
			assert!(trained.contains(&word), "unexpected word: {word:?}");
		}
	}

	#[test]
	fn a_reloaded_snapshot_counts_as_trained() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("Model.json");

		{
			let store = ModelStore::open(&path).unwrap();
			let mut chain = MarkovChain::with_seed(store, 7);
			chain.train(FIRST_TEXT).unwrap();
		}

		let store = ModelStore::open(&path).unwrap();
		let mut chain = MarkovChain::with_seed(store, 7);
		assert!(chain.is_trained());
		assert!(chain.generate(5).is_ok());
	}
}
