//! ABA archive file support.
//!
//! ABA archives hold the cutscene assets as a flat directory of compressed
//! files, tagged "D.M." (Delphine Multimedia). The directory is a 2-byte
//! big-endian entry count, a 2-byte record size (always 30), then the
//! fixed-width records:
//!
//! | Size | Field |
//! |------|-------|
//! | 14 | null- or space-padded ASCII name |
//! | 4 | file offset (big-endian) |
//! | 4 | compressed size (big-endian) |
//! | 4 | uncompressed size (big-endian) |
//! | 4 | magic tag `0x442E4D2E` |
//!
//! An entry is Bytekiller-compressed iff its two sizes differ. Entries
//! whose tag does not match are kept with a warning; the tag is advisory.

use std::fmt::Formatter;
use std::io::Read;

use log::warn;

use crate::file::{FbFileError, FileType, bytekiller};

mod constants {
	/// Magic tag marking valid entries: "D.M." (Delphine Multimedia)
	pub const ENTRY_TAG: u32 = 0x442E_4D2E;

	/// Size of the archive directory header in bytes
	pub const HEADER_SIZE: usize = 4;

	/// Fixed size of a directory record in bytes
	pub const ENTRY_SIZE: usize = 30;

	/// Length of the name field in a directory record
	pub const NAME_LEN: usize = 14;
}

/// Archive directory header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Header {
	/// Number of directory entries
	pub entry_count: u16,
	/// Size of each directory record, must be 30
	pub entry_size: u16,
}

impl Header {
	/// Size of the header in bytes
	pub const SIZE: usize = constants::HEADER_SIZE;

	/// Parses the directory header from the start of the archive.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FbFileError> {
		if data.len() < constants::HEADER_SIZE {
			return Err(FbFileError::truncated(
				FileType::Aba,
				0,
				constants::HEADER_SIZE,
				data.len(),
			));
		}

		let entry_count = u16::from_be_bytes([data[0], data[1]]);
		let entry_size = u16::from_be_bytes([data[2], data[3]]);
		if entry_size as usize != constants::ENTRY_SIZE {
			return Err(FbFileError::bad_magic(FileType::Aba, "entry record size is not 30"));
		}

		Ok(Self {
			entry_count,
			entry_size,
		})
	}
}

impl std::fmt::Display for Header {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ABA {{ entries: {}, record size: {} }}", self.entry_count, self.entry_size)
	}
}

/// A single directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entry {
	/// Raw padded ASCII name
	pub raw_name: [u8; constants::NAME_LEN],
	/// Offset of the payload within the archive
	pub offset: u32,
	/// Stored payload size
	pub compressed_size: u32,
	/// Size after Bytekiller decompression
	pub uncompressed_size: u32,
	/// Entry tag, expected to be "D.M."
	pub tag: u32,
}

impl Entry {
	/// Size of a directory record in bytes
	pub const fn size() -> usize {
		constants::ENTRY_SIZE
	}

	/// Parses one directory record.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FbFileError> {
		if data.len() < constants::ENTRY_SIZE {
			return Err(FbFileError::truncated(
				FileType::Aba,
				0,
				constants::ENTRY_SIZE,
				data.len(),
			));
		}

		let mut raw_name = [0u8; constants::NAME_LEN];
		raw_name.copy_from_slice(&data[..constants::NAME_LEN]);

		Ok(Self {
			raw_name,
			offset: u32::from_be_bytes([data[14], data[15], data[16], data[17]]),
			compressed_size: u32::from_be_bytes([data[18], data[19], data[20], data[21]]),
			uncompressed_size: u32::from_be_bytes([data[22], data[23], data[24], data[25]]),
			tag: u32::from_be_bytes([data[26], data[27], data[28], data[29]]),
		})
	}

	/// Returns the entry name with padding stripped.
	pub fn name(&self) -> String {
		let end = self.raw_name.iter().position(|&b| b == 0).unwrap_or(constants::NAME_LEN);
		String::from_utf8_lossy(&self.raw_name[..end]).trim_end().to_string()
	}

	/// True when the payload is Bytekiller-compressed.
	pub fn is_compressed(&self) -> bool {
		self.compressed_size != self.uncompressed_size
	}

	/// True when the entry carries the expected "D.M." tag.
	pub fn has_valid_tag(&self) -> bool {
		self.tag == constants::ENTRY_TAG
	}
}

impl std::fmt::Display for Entry {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Entry {{ name: '{}', offset: {}, compressed: {}, uncompressed: {} }}",
			self.name(),
			self.offset,
			self.compressed_size,
			self.uncompressed_size
		)
	}
}

/// An opened ABA archive: directory plus payload bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
	header: Header,
	entries: Vec<Entry>,
	data: Vec<u8>,
}

impl Archive {
	/// Opens an ABA archive from the specified path.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, FbFileError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(data)
	}

	/// Loads an ABA archive from any reader.
	pub fn from_reader<R: Read>(reader: &mut R) -> Result<Self, FbFileError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(data)
	}

	/// Parses the archive directory, taking ownership of the bytes.
	///
	/// Entries with an unexpected tag are kept; the mismatch is logged as a
	/// warning.
	pub fn from_bytes(data: Vec<u8>) -> Result<Self, FbFileError> {
		let header = Header::from_bytes(&data)?;

		let mut entries = Vec::with_capacity(header.entry_count as usize);
		let mut offset = Header::SIZE;
		for _ in 0..header.entry_count {
			if offset + Entry::size() > data.len() {
				return Err(FbFileError::truncated(
					FileType::Aba,
					offset,
					Entry::size(),
					data.len().saturating_sub(offset),
				));
			}
			let entry = Entry::from_bytes(&data[offset..offset + Entry::size()])?;
			if !entry.has_valid_tag() {
				warn!("entry '{}' has unexpected tag {:#010x}", entry.name(), entry.tag);
			}
			entries.push(entry);
			offset += Entry::size();
		}

		Ok(Self {
			header,
			entries,
			data,
		})
	}

	/// Returns the archive header.
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns all directory entries.
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Number of entries in the archive.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when the archive holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Finds an entry by name, case-insensitively.
	pub fn find_entry(&self, name: &str) -> Option<&Entry> {
		self.entries.iter().find(|e| e.name().eq_ignore_ascii_case(name))
	}

	/// Extracts an entry's payload, decompressing when the entry's sizes
	/// differ.
	pub fn extract(&self, name: &str) -> Result<Vec<u8>, FbFileError> {
		let entry = self.find_entry(name).ok_or_else(|| FbFileError::UnknownEntry {
			name: name.to_string(),
		})?;

		let start = entry.offset as usize;
		let end = start + entry.compressed_size as usize;
		if end > self.data.len() {
			return Err(FbFileError::truncated(
				FileType::Aba,
				start,
				entry.compressed_size as usize,
				self.data.len().saturating_sub(start),
			));
		}

		let payload = &self.data[start..end];
		if entry.is_compressed() {
			bytekiller::unpack(payload)
		} else {
			Ok(payload.to_vec())
		}
	}

	/// Collects `(stem, cmd_bytes, pol_bytes)` for every `.CMD` entry with
	/// a matching `.POL` entry, sorted by stem.
	///
	/// Pairs whose payloads fail to extract are skipped with a warning.
	pub fn cutscene_pairs(&self) -> Vec<(String, Vec<u8>, Vec<u8>)> {
		let mut stems: Vec<String> = self
			.entries
			.iter()
			.map(|e| e.name().to_uppercase())
			.filter(|n| n.ends_with(".CMD"))
			.map(|n| n[..n.len() - 4].to_string())
			.collect();
		stems.sort();

		let mut pairs = Vec::new();
		for stem in stems {
			let cmd_name = format!("{stem}.CMD");
			let pol_name = format!("{stem}.POL");
			if self.find_entry(&pol_name).is_none() {
				warn!("no POL entry paired with '{cmd_name}', skipping");
				continue;
			}
			let cmd = match self.extract(&cmd_name) {
				Ok(bytes) => bytes,
				Err(err) => {
					warn!("failed to extract '{cmd_name}': {err}");
					continue;
				}
			};
			let pol = match self.extract(&pol_name) {
				Ok(bytes) => bytes,
				Err(err) => {
					warn!("failed to extract '{pol_name}': {err}");
					continue;
				}
			};
			pairs.push((stem, cmd, pol));
		}
		pairs
	}
}
