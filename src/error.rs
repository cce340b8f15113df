use thiserror::Error;

use crate::nbt::tag::TagID;

/// The master error type.
#[derive(Debug, Error)]
pub enum NbtError {
	#[error("IO Error: {0}")]
	IoError(#[from] std::io::Error),
	#[error("Unexpected end of stream.")]
	Truncated,
	#[error("Unsupported Tag ID: {0}")]
	InvalidTag(u8),
	#[error("Invalid List length: {0}")]
	InvalidList(i32),
	#[error("Negative length prefix: {0}")]
	NegativeLength(i32),
	#[error("Expected {expected}, found {found}.")]
	TypeMismatch { expected: TagID, found: TagID },
	#[error("No element named \"{0}\".")]
	NotFound(String),
	#[error("Decompression failed: {0}")]
	Decompress(#[source] std::io::Error),
	#[error("Unsupported compression scheme: {0}")]
	UnsupportedCompression(u8),
	#[error("Failed to convert to UTF-8 string.")]
	FromUtf8Error(#[from] std::string::FromUtf8Error),
	#[error("Chunk data would occupy more than 255 sectors.")]
	ChunkTooLarge,
}

impl NbtError {
	/// Maps the end-of-stream condition onto [NbtError::Truncated] so that a
	/// short read mid-frame is distinguishable from other IO failures.
	pub(crate) fn from_read_error(err: std::io::Error) -> Self {
		if err.kind() == std::io::ErrorKind::UnexpectedEof {
			NbtError::Truncated
		} else {
			NbtError::IoError(err)
		}
	}
}

pub type NbtResult<T> = Result<T, NbtError>;
