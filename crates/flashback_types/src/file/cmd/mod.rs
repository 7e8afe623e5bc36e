//! CMD cutscene script file support.
//!
//! CMD files hold the bytecode driving cutscene playback: shape draws,
//! palette switches, timing syncs, subtitle placement and input-driven
//! branching.
//!
//! ## File layout
//!
//! A big-endian u16 sub-cutscene count, then that many big-endian u16
//! offsets, then the opcode region starting at `(count + 1) * 2`. The
//! offsets are relative to the opcode region. A count of zero means one
//! implicit sub-cutscene at relative offset zero.
//!
//! Within a sub-cutscene, commands are decoded serially until the end of
//! the buffer or a byte with the high bit set (the terminator, which is
//! consumed). Each command byte encodes `opcode = byte >> 2`; the low two
//! bits are flags that decoding ignores.

pub mod command;
pub mod frame;


pub use command::{Command, KeyHandler, MAX_OPCODE, TextArgs};
pub use frame::{Frame, Subscene};

use serde::Serialize;

use crate::file::{FbFileError, FileType};

/// A fully decoded CMD document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
	subscene_count: usize,
	base_offset: usize,
	subscenes: Vec<Subscene>,
}

impl File {
	/// Decodes a complete CMD document from a byte slice.
	pub fn from_bytes(data: &[u8]) -> Result<Self, FbFileError> {
		let mut parser = Parser {
			data,
			pos: 0,
		};

		let declared = parser.read_be_u16()? as usize;
		let base_offset = (declared + 1) * 2;

		let offsets = if declared == 0 {
			vec![0u16]
		} else {
			let mut offsets = Vec::with_capacity(declared);
			for _ in 0..declared {
				offsets.push(parser.read_be_u16()?);
			}
			offsets
		};

		let mut subscenes = Vec::with_capacity(offsets.len());
		for (id, &offset) in offsets.iter().enumerate() {
			parser.pos = base_offset + offset as usize;
			let commands = parser.parse_commands()?;
			subscenes.push(Subscene {
				id,
				offset,
				frames: frame::partition(commands),
			});
		}

		Ok(Self {
			subscene_count: subscenes.len(),
			base_offset,
			subscenes,
		})
	}

	/// Number of sub-cutscenes (at least one).
	pub fn subscene_count(&self) -> usize {
		self.subscene_count
	}

	/// Byte offset of the opcode region.
	pub fn base_offset(&self) -> usize {
		self.base_offset
	}

	/// Returns the decoded sub-cutscenes.
	pub fn subscenes(&self) -> &[Subscene] {
		&self.subscenes
	}

	/// Gets a sub-cutscene by index.
	pub fn get_subscene(&self, index: usize) -> Option<&Subscene> {
		self.subscenes.get(index)
	}
}

/// Serial reader over the command stream.
struct Parser<'a> {
	data: &'a [u8],
	pos: usize,
}

impl Parser<'_> {
	fn truncated(&self, needed: usize) -> FbFileError {
		FbFileError::truncated(
			FileType::Cmd,
			self.pos,
			needed,
			self.data.len().saturating_sub(self.pos),
		)
	}

	fn read_u8(&mut self) -> Result<u8, FbFileError> {
		let value = *self.data.get(self.pos).ok_or_else(|| self.truncated(1))?;
		self.pos += 1;
		Ok(value)
	}

	fn read_i8(&mut self) -> Result<i8, FbFileError> {
		self.read_u8().map(|v| v as i8)
	}

	fn read_be_u16(&mut self) -> Result<u16, FbFileError> {
		if self.pos + 2 > self.data.len() {
			return Err(self.truncated(2));
		}
		let value = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]);
		self.pos += 2;
		Ok(value)
	}

	fn read_be_i16(&mut self) -> Result<i16, FbFileError> {
		self.read_be_u16().map(|v| v as i16)
	}

	/// Decodes commands until the terminator or the end of the buffer.
	fn parse_commands(&mut self) -> Result<Vec<Command>, FbFileError> {
		let mut commands = Vec::new();
		while self.pos < self.data.len() {
			match self.parse_command()? {
				Some(command) => commands.push(command),
				None => break,
			}
		}
		Ok(commands)
	}

	/// Decodes one command; `None` on the high-bit terminator.
	fn parse_command(&mut self) -> Result<Option<Command>, FbFileError> {
		let start = self.pos;
		let byte = self.read_u8()?;

		if byte & 0x80 != 0 {
			return Ok(None);
		}

		let opcode = byte >> 2;
		if opcode > MAX_OPCODE {
			return Err(FbFileError::BadOpcode {
				opcode,
				offset: start,
			});
		}

		let command = match opcode {
			0 | 5 => Command::MarkCurPos,
			1 => Command::RefreshScreen {
				clear_mode: self.read_u8()?,
			},
			2 => Command::WaitForSync {
				frames: self.read_u8()?,
			},
			3 => {
				let (shape_id, x, y) = self.read_shape_position()?;
				Command::DrawShape {
					shape_id,
					x,
					y,
				}
			}
			4 => Command::SetPalette {
				palette_num: self.read_u8()?,
				buffer_num: self.read_u8()?,
			},
			6 => Command::DrawCaptionText {
				string_id: self.read_be_u16()?,
			},
			7 => Command::Nop,
			8 => Command::Skip3 {
				skipped: [self.read_u8()?, self.read_u8()?, self.read_u8()?],
			},
			9 => Command::RefreshAll,
			10 => {
				let (shape_id, x, y) = self.read_shape_position()?;
				Command::DrawShapeScale {
					shape_id,
					x,
					y,
					zoom: self.read_be_u16()?,
					origin_x: self.read_u8()?,
					origin_y: self.read_u8()?,
				}
			}
			11 => self.parse_draw_shape_scale_rotate()?,
			12 => Command::CopyScreen,
			13 => self.parse_draw_text_at_pos()?,
			_ => Command::HandleKeys {
				handlers: self.parse_key_handlers()?,
			},
		};

		Ok(Some(command))
	}

	/// Shared prefix of the shape-draw opcodes: the shape word's low 11
	/// bits are the id, bit 15 marks an explicit position pair.
	fn read_shape_position(&mut self) -> Result<(u16, i16, i16), FbFileError> {
		let word = self.read_be_u16()?;
		let shape_id = word & 0x7FF;
		if word & 0x8000 != 0 {
			let x = self.read_be_i16()?;
			let y = self.read_be_i16()?;
			Ok((shape_id, x, y))
		} else {
			Ok((shape_id, 0, 0))
		}
	}

	fn parse_draw_shape_scale_rotate(&mut self) -> Result<Command, FbFileError> {
		let word = self.read_be_u16()?;
		let shape_id = word & 0x7FF;

		let (x, y) = if word & 0x8000 != 0 {
			(self.read_be_i16()?, self.read_be_i16()?)
		} else {
			(0, 0)
		};

		let zoom = if word & 0x4000 != 0 {
			self.read_be_u16()?
		} else {
			0
		};

		let origin_x = self.read_u8()?;
		let origin_y = self.read_u8()?;
		let rotation_a = self.read_be_u16()?;

		let rotation_b = if word & 0x2000 != 0 {
			self.read_be_u16()?
		} else {
			180
		};

		let rotation_c = if word & 0x1000 != 0 {
			self.read_be_u16()?
		} else {
			90
		};

		Ok(Command::DrawShapeScaleRotate {
			shape_id,
			x,
			y,
			zoom,
			origin_x,
			origin_y,
			rotation_a,
			rotation_b,
			rotation_c,
		})
	}

	fn parse_draw_text_at_pos(&mut self) -> Result<Command, FbFileError> {
		let word = self.read_be_u16()?;
		if word == 0xFFFF {
			return Ok(Command::DrawTextAtPos {
				text: None,
			});
		}

		let text = TextArgs {
			string_id: word & 0xFFF,
			color: ((word >> 12) & 0xF) as u8,
			x: i16::from(self.read_i8()?) * 8,
			y: i16::from(self.read_i8()?) * 8,
		};

		Ok(Command::DrawTextAtPos {
			text: Some(text),
		})
	}

	/// Reads `(key_mask, target)` tuples up to the 0xFF sentinel, which is
	/// consumed.
	fn parse_key_handlers(&mut self) -> Result<Vec<KeyHandler>, FbFileError> {
		let mut handlers = Vec::new();
		loop {
			if self.pos >= self.data.len() {
				return Err(FbFileError::UnterminatedHandlers {
					offset: self.pos,
				});
			}
			let key_mask = self.read_u8()?;
			if key_mask == 0xFF {
				return Ok(handlers);
			}
			let target = self.read_be_i16()?;
			handlers.push(KeyHandler {
				key_mask,
				target,
			});
		}
	}
}
