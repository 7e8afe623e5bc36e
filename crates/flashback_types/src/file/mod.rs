//! File type support for the `flashback-rs` project.

mod error;

pub mod aba;
pub mod bytekiller;
pub mod cmd;
pub mod cutscene;
pub mod pol;

// Re-export unified error type
pub use error::{FbFileError, FileType};

// Re-export main file types
pub use aba::{Archive as AbaArchive, Entry as AbaEntry};
pub use cmd::{Command, File as CmdFile, Frame, KeyHandler, Subscene};
pub use cutscene::Cutscene;
pub use pol::{Color, File as PolFile, Palette, Primitive, PrimitiveKind, Shape};
