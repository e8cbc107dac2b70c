use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::model::trigram::Trigram;

/// Default location of the persisted snapshot.
pub const DEFAULT_MODEL_PATH: &str = "./Model.json";

/// Associative store mapping a prefix key to its trigram entry.
///
/// The key is the raw concatenation of the two prefix words, with no
/// separator. One entry per distinct prefix pair; entries are only
/// added during training, never removed.
///
/// # Responsibilities
/// - Load a JSON snapshot from disk at creation, when one exists
/// - Persist the whole model back to disk after each training pass
/// - Answer count and inspection queries
///
/// # Notes
/// - Persistence is a whole-file overwrite, written to a temporary
///   file in the same directory and atomically renamed into place so
///   a failed write never leaves a corrupt snapshot visible.
/// - Key enumeration order is whatever the map yields; callers must
///   not rely on it.
#[derive(Debug)]
pub struct ModelStore {
	path: PathBuf,
	entries: HashMap<String, Trigram>,
}

impl ModelStore {
	/// Opens a store backed by the given snapshot path.
	///
	/// Loads the snapshot if the file exists, otherwise starts empty.
	///
	/// # Errors
	/// Returns an error if an existing snapshot cannot be read or parsed.
	pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref().to_path_buf();
		let entries = if path.exists() {
			let contents = std::fs::read_to_string(&path)?;
			serde_json::from_str(&contents)?
		} else {
			HashMap::new()
		};
		Ok(Self { path, entries })
	}

	/// Opens a store backed by the default snapshot path (`./Model.json`).
	pub fn open_default() -> Result<Self> {
		Self::open(DEFAULT_MODEL_PATH)
	}

	/// Number of distinct prefix keys in the store.
	pub fn count(&self) -> usize {
		self.entries.len()
	}

	/// Whether the store holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Looks up the entry for a prefix key.
	///
	/// An absent key is an ordinary outcome (a dead end during
	/// generation), not an error.
	pub fn get(&self, key: &str) -> Option<&Trigram> {
		self.entries.get(key)
	}

	/// Returns the entry for `key`, creating it with the given prefix
	/// pair if it does not exist yet.
	pub fn entry_or_insert(&mut self, key: String, prefix1: &str, prefix2: &str) -> &mut Trigram {
		self.entries
			.entry(key)
			.or_insert_with(|| Trigram::new(prefix1, prefix2))
	}

	/// All prefix keys currently in the store, in enumeration order.
	pub fn keys(&self) -> Vec<&str> {
		self.entries.keys().map(String::as_str).collect()
	}

	/// Read-only access to the raw entry map, for inspection.
	pub fn entries(&self) -> &HashMap<String, Trigram> {
		&self.entries
	}

	/// Persists the whole model to the snapshot path.
	///
	/// The serialized JSON is written to a temporary file next to the
	/// target and renamed over it, so the previous snapshot stays
	/// intact if the write fails midway.
	///
	/// # Errors
	/// Returns an error if serialization or any file operation fails.
	pub fn persist(&self) -> Result<()> {
		let serialized = serde_json::to_string(&self.entries)?;

		let parent = match self.path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p,
			_ => Path::new("."),
		};
		let mut temp_file = NamedTempFile::new_in(parent)?;
		temp_file.write_all(serialized.as_bytes())?;
		temp_file.persist(&self.path).map_err(|e| e.error)?;

		Ok(())
	}
}
