use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads a text file fully into memory as UTF-8.
pub(crate) fn read_file<P: AsRef<Path>>(filename: P) -> std::io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads an already-opened byte stream fully into memory as UTF-8.
///
/// The stream is consumed from its current position; callers that need
/// the whole file should rewind before handing it over.
pub(crate) fn read_stream<R: Read>(mut reader: R) -> std::io::Result<String> {
	let mut contents = String::new();
	reader.read_to_string(&mut contents)?;
	Ok(contents)
}
