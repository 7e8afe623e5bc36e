//! Prelude module for `flashback_internal`.
//!
//! This module provides a convenient way to import commonly used types.
//!
//! # Examples
//!
//! ```no_run
//! use flashback_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = AbaArchive::open("DEMO_UK.ABA")?;
//! for (name, cmd, pol) in archive.cutscene_pairs() {
//!     let cutscene = Cutscene::extract(&name, &cmd, &pol)?;
//! }
//! # Ok(())
//! # }
//! ```

// Re-export everything from flashback_types::prelude
#[doc(inline)]
pub use flashback_types::prelude::*;

// Re-export the entire flashback_types module for advanced usage
#[doc(inline)]
pub use flashback_types;
