//! Prelude module for `flashback_types`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use flashback_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = AbaArchive::open("DEMO_UK.ABA")?;
//! println!("{} entries", archive.len());
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	// ABA types
	AbaArchive,
	AbaEntry,

	// CMD types
	CmdFile,
	Color,
	Command,

	// Cutscene record
	Cutscene,
	FbFileError,
	FileType,
	Frame,
	KeyHandler,

	// POL types
	Palette,
	PolFile,
	Primitive,
	PrimitiveKind,
	Shape,
	Subscene,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
