//! Frame grouping of cutscene commands.

use serde::Serialize;

use super::command::Command;

/// A group of commands presented together.
///
/// A frame begins at the start of a sub-cutscene or right after a
/// `MarkCurPos`, and extends up to and including the next `MarkCurPos`.
/// The trailing frame of a sub-cutscene may lack its closing mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
	/// Commands of this frame, in stream order
	pub commands: Vec<Command>,
}

/// A linearly-addressable sub-program of a CMD document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscene {
	/// Zero-based sub-cutscene index
	pub id: usize,
	/// Offset of the command stream, relative to the opcode region base
	pub offset: u16,
	/// Frames in playback order
	pub frames: Vec<Frame>,
}

impl Subscene {
	/// Total number of commands across all frames.
	pub fn command_count(&self) -> usize {
		self.frames.iter().map(|f| f.commands.len()).sum()
	}
}

/// Partitions a linear command list into frames.
///
/// Command order is preserved and no command is dropped: concatenating the
/// frames' command lists reproduces the input.
pub(super) fn partition(commands: Vec<Command>) -> Vec<Frame> {
	let mut frames = Vec::new();
	let mut current = Vec::new();

	for command in commands {
		let closes_frame = command.is_frame_mark();
		current.push(command);
		if closes_frame {
			frames.push(Frame {
				commands: std::mem::take(&mut current),
			});
		}
	}

	if !current.is_empty() {
		frames.push(Frame {
			commands: current,
		});
	}

	frames
}
