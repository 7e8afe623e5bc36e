//! Cutscene extraction façade.
//!
//! Combines the Bytekiller, POL and CMD decoders into a single entry
//! point: given a named pair of raw buffers, decompress what needs
//! decompressing, decode both sides and package the result.

use std::borrow::Cow;

use log::debug;
use serde::Serialize;

use crate::file::{FbFileError, bytekiller, cmd, pol};

/// A fully decoded cutscene: vector graphics plus playback script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cutscene {
	/// Uppercased asset stem, e.g. "INTRO1"
	name: String,
	palettes: Vec<pol::Palette>,
	shapes: Vec<pol::Shape>,
	script: cmd::File,
}

impl Cutscene {
	/// Decodes a cutscene from its raw CMD and POL buffers.
	///
	/// Each buffer is probed with [`bytekiller::looks_compressed`] and
	/// decompressed when the probe matches; a failed decompression falls
	/// back to the raw bytes. Archive extraction already hands over
	/// decompressed payloads, so the probe only fires for loose files.
	pub fn extract(name: &str, cmd_bytes: &[u8], pol_bytes: &[u8]) -> Result<Self, FbFileError> {
		let cmd_bytes = unpack_if_compressed(cmd_bytes);
		let pol_bytes = unpack_if_compressed(pol_bytes);

		let (palettes, shapes) = pol::File::from_bytes(&pol_bytes)?.into_parts();
		let script = cmd::File::from_bytes(&cmd_bytes)?;

		Ok(Self {
			name: name.to_uppercase(),
			palettes,
			shapes,
			script,
		})
	}

	/// Returns the cutscene name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the decoded palettes.
	pub fn palettes(&self) -> &[pol::Palette] {
		&self.palettes
	}

	/// Returns the decoded shapes.
	pub fn shapes(&self) -> &[pol::Shape] {
		&self.shapes
	}

	/// Returns the decoded playback script.
	pub fn script(&self) -> &cmd::File {
		&self.script
	}
}

/// Runs the Bytekiller probe and decompresses on a match, keeping the raw
/// bytes when decoding fails.
fn unpack_if_compressed(data: &[u8]) -> Cow<'_, [u8]> {
	if bytekiller::looks_compressed(data) {
		match bytekiller::unpack(data) {
			Ok(decoded) => return Cow::Owned(decoded),
			Err(err) => debug!("buffer failed to decompress, keeping raw bytes: {err}"),
		}
	}
	Cow::Borrowed(data)
}

#[cfg(test)]
mod tests {
	use test_log::test;

	use super::*;

	/// Minimal POL: one gray palette, one point shape.
	fn sample_pol() -> Vec<u8> {
		let mut data = vec![0u8; 0x14];
		data[0x02..0x04].copy_from_slice(&0x0014_u16.to_be_bytes()); // shape table
		data[0x06..0x08].copy_from_slice(&0x0016_u16.to_be_bytes()); // palettes
		data[0x0A..0x0C].copy_from_slice(&0x0036_u16.to_be_bytes()); // vertex table
		data[0x0E..0x10].copy_from_slice(&0x0038_u16.to_be_bytes()); // shape data
		data[0x12..0x14].copy_from_slice(&0x003D_u16.to_be_bytes()); // vertex data
		data.extend_from_slice(&[0x00, 0x00]); // shape 0 offset
		data.extend_from_slice(&[0u8; 32]); // palette 0
		data.extend_from_slice(&[0x00, 0x00]); // vertex 0 offset
		data.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x07]); // shape 0
		data.extend_from_slice(&[0x00, 0x00, 0x05, 0x00, 0x0A]); // point (5, 10)
		data
	}

	fn sample_cmd() -> Vec<u8> {
		vec![0x00, 0x00, 0x08, 0x05, 0x10, 0x04, 0x02, 0x84]
	}

	#[test]
	fn extracts_raw_pair() {
		let cutscene = Cutscene::extract("intro1", &sample_cmd(), &sample_pol()).unwrap();

		assert_eq!(cutscene.name(), "INTRO1");
		assert_eq!(cutscene.palettes().len(), 1);
		assert_eq!(cutscene.shapes().len(), 1);
		assert!(cutscene.shapes()[0].primitives[0].kind.is_point());
		assert_eq!(cutscene.script().subscene_count(), 1);
	}

	#[test]
	fn failed_decompression_falls_back_to_raw_bytes() {
		// A valid CMD stream followed by trailer-shaped junk: the probe
		// matches (declared size 100 is between len and 20 * len) but the
		// Bytekiller pass fails, so the raw bytes must be parsed as-is.
		// The CMD parser never reads past its 0x84 terminator.
		let mut cmd = sample_cmd();
		cmd.extend_from_slice(&1u32.to_be_bytes());
		cmd.extend_from_slice(&0u32.to_be_bytes());
		cmd.extend_from_slice(&100u32.to_be_bytes());
		assert!(bytekiller::looks_compressed(&cmd));

		let cutscene = Cutscene::extract("FALLBACK", &cmd, &sample_pol()).unwrap();
		assert_eq!(cutscene.script().subscenes()[0].frames[0].commands.len(), 2);
	}

	#[test]
	fn pol_failure_fails_the_cutscene() {
		let err = Cutscene::extract("BROKEN", &sample_cmd(), &[0u8; 4]).unwrap_err();
		assert!(matches!(err, FbFileError::Truncated { .. }));
	}

	#[test]
	fn compressed_cmd_is_unpacked_before_parsing() {
		// A 24-byte CMD (empty header + eleven `waitForSync 1` commands)
		// packed by hand into 20 bytes: a two-byte literal run, a length-20
		// back reference at offset 2, and a final two-byte literal run for
		// the header. The probe fires (20 < 24 < 400) and the decoded
		// buffer parses as a script.
		let mut cmd = Vec::new();
		cmd.extend_from_slice(&0x0000_8200_u32.to_be_bytes());
		cmd.extend_from_slice(&0x6431_0808_u32.to_be_bytes());
		cmd.extend_from_slice(&0x0000_0002_u32.to_be_bytes());
		cmd.extend_from_slice(&0x6431_8A0A_u32.to_be_bytes());
		cmd.extend_from_slice(&24u32.to_be_bytes());
		assert!(bytekiller::looks_compressed(&cmd));

		let cutscene = Cutscene::extract("ZOOM", &cmd, &sample_pol()).unwrap();
		let sub = &cutscene.script().subscenes()[0];
		assert_eq!(sub.frames.len(), 1);
		assert_eq!(sub.frames[0].commands.len(), 11);
		assert!(sub.frames[0].commands.iter().all(|c| matches!(
			c,
			crate::file::cmd::Command::WaitForSync {
				frames: 1,
			}
		)));
	}
}
