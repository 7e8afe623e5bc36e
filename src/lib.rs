//! `flashback-rs` extracts and decodes cutscene assets from a classic
//! Delphine Software adventure game, turning the Bytekiller, POL and CMD
//! binary formats into a structured model ready for a modern renderer.

pub use flashback_internal::*;
