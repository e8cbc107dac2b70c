use rand::Rng;

use serde::{Deserialize, Serialize};

/// Represents a single entry of the trigram model.
///
/// A `Trigram` corresponds to a fixed two-word prefix and stores every
/// successor word observed after this prefix during training.
///
/// Conceptually, this is a node in a second-order Markov chain where
/// outgoing edges are weighted by their number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Sample the next word uniformly over the observed list
///
/// ## Invariants
/// - `prefix_words` is set once at creation and never changes
/// - Every entry held by a store has at least one suffix (an entry is
///   only created when its first successor is observed)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trigram {
	/// Ordered pair of words forming the prefix.
	prefix_words: [String; 2],
	/// Successor words in insertion order. Duplicates are kept: a word
	/// observed twice is twice as likely to be sampled.
	suffixes: Vec<String>,
}

impl Trigram {
	/// Creates a new entry for the given prefix pair, with no suffixes yet.
	pub fn new(prefix1: &str, prefix2: &str) -> Self {
		Self {
			prefix_words: [prefix1.to_owned(), prefix2.to_owned()],
			suffixes: Vec::new(),
		}
	}

	/// Records an observed successor word.
	///
	/// Always appends; repetition is how frequency is encoded.
	pub fn add(&mut self, suffix: &str) {
		self.suffixes.push(suffix.to_owned());
	}

	/// The two prefix words this entry was created for.
	pub fn prefix_words(&self) -> &[String; 2] {
		&self.prefix_words
	}

	/// The successor words in insertion order.
	pub fn suffixes(&self) -> &[String] {
		&self.suffixes
	}

	/// Samples one successor word uniformly at random, with replacement
	/// across calls.
	///
	/// The selection is uniform over the list's current length, so a
	/// duplicated word carries proportionally more weight.
	///
	/// Returns `None` if the entry has no suffixes.
	pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<&str> {
		if self.suffixes.is_empty() {
			return None;
		}
		let index = rng.random_range(0..self.suffixes.len());
		Some(&self.suffixes[index])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn add_keeps_insertion_order_and_duplicates() {
		let mut trigram = Trigram::new("uno", "dos");
		trigram.add("tres");
		trigram.add("cuatro");
		trigram.add("tres");
		assert_eq!(trigram.prefix_words(), &["uno".to_owned(), "dos".to_owned()]);
		assert_eq!(trigram.suffixes(), ["tres", "cuatro", "tres"]);
	}

	#[test]
	fn sample_returns_an_observed_suffix() {
		let mut trigram = Trigram::new("uno", "dos");
		trigram.add("tres");
		trigram.add("cuatro");

		let mut rng = StdRng::seed_from_u64(42);
		for _ in 0..50 {
			let word = trigram.sample(&mut rng).unwrap();
			assert!(word == "tres" || word == "cuatro");
		}
	}

	#[test]
	fn sample_on_empty_entry_is_none() {
		let trigram = Trigram::new("uno", "dos");
		let mut rng = StdRng::seed_from_u64(0);
		assert!(trigram.sample(&mut rng).is_none());
	}

	#[test]
	fn serializes_with_snapshot_field_names() {
		let mut trigram = Trigram::new("uno", "dos");
		trigram.add("tres");
		let value = serde_json::to_value(&trigram).unwrap();
		assert!(value.get("prefixWords").is_some());
		assert!(value.get("suffixes").is_some());
	}
}
