//! Geometry micro-formats and draw-command decoding for Graphviz layout output.
//!
//! Graphviz encodes computed geometry as compact strings (`"27,18"`,
//! `"0,0,54,108"`, `"e,27,36.1 27,71.7 27,63.98 27,55.71"`) and rendering
//! instructions as small JSON records keyed by a one-character opcode, the
//! xdot language. This crate turns both into typed values.
//!
//! It knows nothing about the graph envelope those values arrive in; errors
//! carry the offending input but no record context. Callers attach that.

pub mod draw;
pub mod geometry;

pub use draw::{
    Color, DrawCommand, FontCharacteristics, GradientStop, RawDrawCommand, RawGradientStop, TextAlign,
    decode_commands,
};
pub use geometry::{BoundingBox, Point, Spline, parse_bounding_box, parse_point, parse_spline};

/// Error returned by the geometry parsers and the draw-command decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XdotError {
    /// A point, bounding box, spline or coordinate array failed its grammar.
    #[error("malformed geometry `{input}`: {reason}")]
    MalformedGeometry { input: String, reason: String },
    /// A draw command used an opcode outside the xdot instruction set.
    #[error("unknown draw opcode `{0}`")]
    UnknownDrawOpcode(String),
    /// A text command carried an alignment code other than `l`, `c` or `r`.
    #[error("invalid text alignment `{0}` (expected l, c or r)")]
    InvalidAlignment(String),
    /// A recognized opcode whose payload lacks a field it cannot be drawn without.
    #[error("draw opcode `{op}` is missing its `{field}` payload")]
    MissingField { op: String, field: &'static str },
}

impl XdotError {
    pub(crate) fn malformed(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedGeometry { input: input.into(), reason: reason.into() }
    }

    /// `true` for failures that belong to the malformed-geometry class,
    /// including draw payloads with missing coordinates.
    #[must_use]
    pub fn is_malformed_geometry(&self) -> bool {
        matches!(self, Self::MalformedGeometry { .. } | Self::MissingField { .. })
    }
}
