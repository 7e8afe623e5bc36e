//! Drawing primitives decoded from POL vertex blobs.

use serde::Serialize;

/// Geometry payload of a primitive.
///
/// The first byte of a vertex blob discriminates the variant: zero for a
/// point, high bit set for an ellipse, anything else for a polygon with
/// that many delta-encoded vertices after the absolute first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PrimitiveKind {
	/// A single point
	Point {
		/// X coordinate
		x: i16,
		/// Y coordinate
		y: i16,
	},

	/// An axis-aligned ellipse
	Ellipse {
		/// Center X
		cx: i16,
		/// Center Y
		cy: i16,
		/// Horizontal radius
		rx: i16,
		/// Vertical radius
		ry: i16,
	},

	/// A filled polygon
	Polygon {
		/// Vertex positions in drawing order
		vertices: Vec<(i16, i16)>,
	},
}

impl PrimitiveKind {
	/// True for the point variant.
	pub fn is_point(&self) -> bool {
		matches!(self, PrimitiveKind::Point { .. })
	}

	/// True for the ellipse variant.
	pub fn is_ellipse(&self) -> bool {
		matches!(self, PrimitiveKind::Ellipse { .. })
	}

	/// True for the polygon variant.
	pub fn is_polygon(&self) -> bool {
		matches!(self, PrimitiveKind::Polygon { .. })
	}
}

/// Render-time translation applied to all coordinates of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrimitiveOffset {
	/// Horizontal offset
	#[serde(rename = "offsetX")]
	pub x: i16,
	/// Vertical offset
	#[serde(rename = "offsetY")]
	pub y: i16,
}

/// A drawing primitive: geometry plus palette index and flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Primitive {
	/// Geometry payload
	#[serde(flatten)]
	pub kind: PrimitiveKind,

	/// Palette index (0-255, typically 0-31)
	pub color: u8,

	/// Whether the primitive is drawn translucent
	#[serde(rename = "hasAlpha")]
	pub has_alpha: bool,

	/// Optional translation, present only when non-zero
	#[serde(flatten, skip_serializing_if = "Option::is_none")]
	pub offset: Option<PrimitiveOffset>,
}

/// An ordered sequence of primitives addressable by shape id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shape {
	/// Zero-based shape id
	pub id: u16,

	/// Primitives in drawing order
	pub primitives: Vec<Primitive>,
}
