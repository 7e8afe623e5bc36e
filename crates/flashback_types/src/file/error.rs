//! Error types for file format parsing.

use thiserror::Error;

/// File formats handled by this crate, used to tag errors with their source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Bytekiller compressed payload
	Bytekiller,
	/// POL polygon data file
	Pol,
	/// CMD cutscene script file
	Cmd,
	/// ABA archive file
	Aba,
}

impl std::fmt::Display for FileType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			FileType::Bytekiller => write!(f, "Bytekiller"),
			FileType::Pol => write!(f, "POL"),
			FileType::Cmd => write!(f, "CMD"),
			FileType::Aba => write!(f, "ABA"),
		}
	}
}

/// Errors that can occur when parsing cutscene asset files.
///
/// Every decoder fails on its first unrecoverable condition and reports the
/// byte offset at which it stopped.
#[derive(Debug, Error)]
pub enum FbFileError {
	/// A fixed-size read ran past the end of the buffer
	#[error("{file_type}: truncated read at offset {offset:#06x} (need {needed} bytes, {available} available)")]
	Truncated {
		/// Format being parsed
		file_type: FileType,
		/// Offset of the failed read
		offset: usize,
		/// Number of bytes the read required
		needed: usize,
		/// Number of bytes left in the buffer
		available: usize,
	},

	/// The reverse bitstream ran out of 32-bit words
	#[error("{file_type}: bitstream exhausted at offset {offset:#06x}")]
	UnexpectedEnd {
		/// Format being parsed
		file_type: FileType,
		/// Byte cursor position when the refill failed
		offset: usize,
	},

	/// The running checksum did not cancel to zero after decoding
	#[error("Bytekiller: CRC check failed (residual {residual:#010x})")]
	CrcMismatch {
		/// XOR residual left in the checksum register
		residual: u32,
	},

	/// Header fields describe impossible table layouts
	#[error("{file_type}: bad header, {reason}")]
	BadMagic {
		/// Format being parsed
		file_type: FileType,
		/// Which derived quantity was invalid
		reason: &'static str,
	},

	/// A command byte decoded to an opcode outside the known table
	#[error("CMD: invalid opcode {opcode} at offset {offset:#06x}")]
	BadOpcode {
		/// The out-of-range opcode value
		opcode: u8,
		/// Offset of the command byte
		offset: usize,
	},

	/// A key-handler list ended without its 0xFF sentinel
	#[error("CMD: key handler list at offset {offset:#06x} is missing its 0xFF terminator")]
	UnterminatedHandlers {
		/// Offset where the next key mask was expected
		offset: usize,
	},

	/// A named entry does not exist in the archive
	#[error("ABA: no entry named '{name}' in archive")]
	UnknownEntry {
		/// The requested entry name
		name: String,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl FbFileError {
	/// Shorthand for a [`FbFileError::Truncated`] error.
	pub fn truncated(file_type: FileType, offset: usize, needed: usize, available: usize) -> Self {
		Self::Truncated {
			file_type,
			offset,
			needed,
			available,
		}
	}

	/// Shorthand for a [`FbFileError::BadMagic`] error.
	pub fn bad_magic(file_type: FileType, reason: &'static str) -> Self {
		Self::BadMagic {
			file_type,
			reason,
		}
	}
}
