//! Cutscene command types.
//!
//! Each command is encoded as `(opcode << 2) | flags` followed by an
//! opcode-specific payload; the two flag bits are not consumed by decoding.
//! A byte with the high bit set terminates the stream.

use serde::Serialize;

/// Highest valid opcode value.
pub const MAX_OPCODE: u8 = 14;

/// A key-handler entry of a [`Command::HandleKeys`] list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyHandler {
	/// Bitmask of keys triggering the branch
	pub key_mask: u8,
	/// Branch target, a signed sub-cutscene reference
	pub target: i16,
}

/// Payload of a [`Command::DrawTextAtPos`], absent when the string id word
/// is the `0xFFFF` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextArgs {
	/// String table index (low 12 bits of the id word)
	pub string_id: u16,
	/// Text color (high nibble of the id word)
	pub color: u8,
	/// X position in pixels (cell value x 8)
	pub x: i16,
	/// Y position in pixels (cell value x 8)
	pub y: i16,
}

/// A single decoded cutscene command.
///
/// Opcode 5 decodes to [`Command::MarkCurPos`] exactly like opcode 0; the
/// two are indistinguishable downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
	/// Closes the current frame and presents it (opcodes 0 and 5)
	MarkCurPos,

	/// Sets the screen clearing mode
	RefreshScreen {
		/// Clear mode selector
		clear_mode: u8,
	},

	/// Waits the given number of sync ticks
	WaitForSync {
		/// Number of ticks to wait
		frames: u8,
	},

	/// Draws a shape at a position
	DrawShape {
		/// Shape id (low 11 bits of the shape word)
		shape_id: u16,
		/// X position, zero when the shape word carries no position
		x: i16,
		/// Y position, zero when the shape word carries no position
		y: i16,
	},

	/// Switches the active palette
	SetPalette {
		/// Palette index
		palette_num: u8,
		/// Target screen buffer
		buffer_num: u8,
	},

	/// Draws a subtitle line
	DrawCaptionText {
		/// String table index
		string_id: u16,
	},

	/// No operation
	Nop,

	/// Three opaque payload bytes with no observed semantics
	Skip3 {
		/// The skipped bytes, preserved verbatim
		skipped: [u8; 3],
	},

	/// Refreshes the whole screen
	RefreshAll,

	/// Draws a shape with scaling
	DrawShapeScale {
		/// Shape id (low 11 bits of the shape word)
		shape_id: u16,
		/// X position
		x: i16,
		/// Y position
		y: i16,
		/// Zoom factor
		zoom: u16,
		/// Scaling origin X
		origin_x: u8,
		/// Scaling origin Y
		origin_y: u8,
	},

	/// Draws a shape with scaling and rotation
	DrawShapeScaleRotate {
		/// Shape id (low 11 bits of the shape word)
		shape_id: u16,
		/// X position
		x: i16,
		/// Y position
		y: i16,
		/// Zoom factor, zero when absent from the stream
		zoom: u16,
		/// Scaling origin X
		origin_x: u8,
		/// Scaling origin Y
		origin_y: u8,
		/// First rotation angle
		rotation_a: u16,
		/// Second rotation angle, 180 when absent from the stream
		rotation_b: u16,
		/// Third rotation angle, 90 when absent from the stream
		rotation_c: u16,
	},

	/// Copies the back buffer to the front buffer
	CopyScreen,

	/// Draws text at a cell position
	DrawTextAtPos {
		/// Text payload, absent for the 0xFFFF sentinel id
		#[serde(flatten, skip_serializing_if = "Option::is_none")]
		text: Option<TextArgs>,
	},

	/// Input-driven branching across sub-cutscenes
	HandleKeys {
		/// Handlers in stream order
		handlers: Vec<KeyHandler>,
	},
}

impl Command {
	/// True when this command closes a frame.
	pub fn is_frame_mark(&self) -> bool {
		matches!(self, Command::MarkCurPos)
	}
}
