//! This crate provides the core data types and file format decoders for the
//! `flashback-rs` project.
//!
//! # File Formats
//!
//! - **ABA**: Flat archive files holding cutscene assets, tagged "D.M."
//! - **POL**: Vector graphics files with shapes, vertex pools and palettes
//! - **CMD**: Bytecode scripts sequencing cutscene playback
//! - **Bytekiller**: The LZSS-variant compression wrapping both asset kinds
//!
//! # Examples
//!
//! ```no_run
//! use flashback_types::file::{AbaArchive, Cutscene};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = AbaArchive::open("DEMO_UK.ABA")?;
//! for (name, cmd, pol) in archive.cutscene_pairs() {
//!     let cutscene = Cutscene::extract(&name, &cmd, &pol)?;
//!     println!("{}: {} shapes", cutscene.name(), cutscene.shapes().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod prelude;

// Re-export commonly used file types at crate root for convenience
pub use file::{
	AbaArchive, AbaEntry, CmdFile, Color, Command, Cutscene, FbFileError, FileType, Frame,
	KeyHandler, Palette, PolFile, Primitive, PrimitiveKind, Shape, Subscene,
};
