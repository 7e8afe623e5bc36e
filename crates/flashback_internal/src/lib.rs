//! Internal crate for `flashback-rs`.
//!
//! This module gathers the public surface of the workspace crates behind a
//! single dependency for the root package, and should not be used directly.
//!
//! # Examples
//!
//! ```no_run
//! use flashback_internal::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = AbaArchive::open("DEMO_UK.ABA")?;
//! # Ok(())
//! # }
//! ```

/// `use flashback_internal::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export flashback_types for convenience
pub use flashback_types;
