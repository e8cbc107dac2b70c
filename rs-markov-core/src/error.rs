use thiserror::Error;

/// Errors produced by training, generation and persistence.
///
/// `FormatText` and `NotTrained` are recoverable: the caller may retry
/// with corrected input or train first. I/O and JSON failures are fatal
/// for the operation that raised them; no retry logic lives here.
#[derive(Error, Debug)]
pub enum MarkovError {
	#[error("the text provided has no periods, use sentences separated with periods")]
	FormatText,

	#[error("the model has not been trained yet")]
	NotTrained,

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MarkovError>;
