//! Draw commands: the xdot rendering instruction set.
//!
//! DESIGN
//! ======
//! Graphviz emits each instruction as a flat JSON record: an `op` string plus
//! whichever payload fields that op uses. [`RawDrawCommand`] mirrors that
//! record loosely so an unknown opcode or a short payload is reported by the
//! decoder with a precise error instead of a generic deserialization failure.
//! [`DrawCommand`] is the closed, typed set produced from it.
//!
//! Opcodes: `e`/`E` ellipse, `p`/`P` polygon, `L` polyline, `b`/`B` B-spline
//! (lowercase unfilled, uppercase filled), `T` text, `t` font characteristics,
//! `c` pen color, `C` fill color, `F` font, `S` style.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::XdotError;
use crate::geometry::Point;

// =============================================================================
// FONT CHARACTERISTIC BITS
// =============================================================================

pub const FONT_BOLD: u32 = 1 << 0;
pub const FONT_ITALIC: u32 = 1 << 1;
pub const FONT_UNDERLINE: u32 = 1 << 2;
pub const FONT_SUPERSCRIPT: u32 = 1 << 3;
pub const FONT_SUBSCRIPT: u32 = 1 << 4;
pub const FONT_STRIKETHROUGH: u32 = 1 << 5;
pub const FONT_OVERLINE: u32 = 1 << 6;

// =============================================================================
// RAW RECORD
// =============================================================================

/// One draw-command record as it appears in `_draw_`, `_ldraw_` and friends.
///
/// Only `op` is typed at deserialization time. The payload stays untyped
/// until [`DrawCommand::decode`] knows which fields the opcode uses, so an
/// unknown opcode is reported as such whatever its payload looks like.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDrawCommand {
    pub op: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl RawDrawCommand {
    /// Payload field `name` as `T`; `None` when absent or `null`.
    fn field<T: DeserializeOwned>(&self, name: &'static str) -> Result<Option<T>, XdotError> {
        match self.payload.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::deserialize(value).map(Some).map_err(|e| {
                XdotError::malformed(value.to_string(), format!("`{name}` of draw opcode `{}`: {e}", self.op))
            }),
        }
    }

    fn required<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, XdotError> {
        self.field(name)?.ok_or_else(|| XdotError::MissingField { op: self.op.clone(), field: name })
    }
}

/// A gradient color stop as emitted for `grad: "linear" | "radial"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGradientStop {
    pub frac: f64,
    pub color: String,
}

// =============================================================================
// TYPED COMMANDS
// =============================================================================

/// Horizontal anchoring of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Map an xdot alignment code (`l`, `c`, `r`).
    ///
    /// # Errors
    ///
    /// Returns [`XdotError::InvalidAlignment`] for any other code.
    pub fn from_code(code: &str) -> Result<Self, XdotError> {
        match code {
            "l" => Ok(Self::Left),
            "c" => Ok(Self::Center),
            "r" => Ok(Self::Right),
            other => Err(XdotError::InvalidAlignment(other.to_owned())),
        }
    }

    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Left => 'l',
            Self::Center => 'c',
            Self::Right => 'r',
        }
    }
}

/// Font style flags unpacked from the `fontchar` bit field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct FontCharacteristics {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub superscript: bool,
    pub subscript: bool,
    pub strikethrough: bool,
    pub overline: bool,
}

impl FontCharacteristics {
    /// Unpack the low seven bits; higher bits are ignored.
    #[must_use]
    pub fn from_bits(bits: u32) -> Self {
        Self {
            bold: bits & FONT_BOLD != 0,
            italic: bits & FONT_ITALIC != 0,
            underline: bits & FONT_UNDERLINE != 0,
            superscript: bits & FONT_SUPERSCRIPT != 0,
            subscript: bits & FONT_SUBSCRIPT != 0,
            strikethrough: bits & FONT_STRIKETHROUGH != 0,
            overline: bits & FONT_OVERLINE != 0,
        }
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        [
            (self.bold, FONT_BOLD),
            (self.italic, FONT_ITALIC),
            (self.underline, FONT_UNDERLINE),
            (self.superscript, FONT_SUPERSCRIPT),
            (self.subscript, FONT_SUBSCRIPT),
            (self.strikethrough, FONT_STRIKETHROUGH),
            (self.overline, FONT_OVERLINE),
        ]
        .into_iter()
        .filter(|(set, _)| *set)
        .fold(0, |acc, (_, bit)| acc | bit)
    }
}

/// A gradient stop: position along the gradient in `0..=1` and its color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub frac: f64,
    pub color: String,
}

/// Payload shared by the pen (`c`) and fill (`C`) color commands.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Color {
    /// Color value as emitted (`#rrggbb`, `#rrggbbaa` or a color name).
    /// Empty when only a gradient is given.
    pub color: String,
    /// Gradient kind (`none`, `linear`, `radial`) when present.
    pub gradient: Option<String>,
    pub stops: Vec<GradientStop>,
}

/// A single decoded rendering instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// `e` / `E`: axis-aligned ellipse given by center and half-axes.
    Ellipse { filled: bool, center: Point, radius_x: f64, radius_y: f64 },
    /// `p` / `P`: closed polygon.
    Polygon { filled: bool, points: Vec<Point> },
    /// `L`: open polyline.
    Polyline { points: Vec<Point> },
    /// `b` / `B`: B-spline through the given control points.
    BSpline { filled: bool, points: Vec<Point> },
    /// `T`: a text run anchored on its baseline.
    Text { anchor: Point, width: f64, align: TextAlign, text: String },
    /// `t`: font style flags for subsequent text.
    FontCharacteristics(FontCharacteristics),
    /// `C`: fill color for subsequent filled shapes.
    FillColor(Color),
    /// `c`: pen color for subsequent outlines and text.
    PenColor(Color),
    /// `F`: font size in points and face name for subsequent text.
    Font { size: f64, face: String },
    /// `S`: a style name such as `solid`, `dashed` or `setlinewidth(2)`.
    Style { name: String },
}

impl DrawCommand {
    /// Decode one raw record.
    ///
    /// # Errors
    ///
    /// - [`XdotError::UnknownDrawOpcode`] for an opcode outside the set above.
    /// - [`XdotError::InvalidAlignment`] for a text command with a bad `align`.
    /// - [`XdotError::MissingField`] when a required payload field is absent.
    /// - [`XdotError::MalformedGeometry`] when a payload field has the wrong
    ///   type or a coordinate array has the wrong arity.
    pub fn decode(raw: &RawDrawCommand) -> Result<Self, XdotError> {
        let op = raw.op.as_str();
        match op {
            "e" | "E" => {
                let rect: Vec<f64> = raw.required("rect")?;
                let &[cx, cy, rx, ry] = rect.as_slice() else {
                    return Err(XdotError::malformed(
                        format!("{rect:?}"),
                        "ellipse rect needs exactly four numbers",
                    ));
                };
                Ok(Self::Ellipse { filled: op == "E", center: Point::new(cx, cy), radius_x: rx, radius_y: ry })
            }
            "p" | "P" => Ok(Self::Polygon { filled: op == "P", points: points(raw)? }),
            "L" => Ok(Self::Polyline { points: points(raw)? }),
            "b" | "B" => Ok(Self::BSpline { filled: op == "B", points: points(raw)? }),
            "T" => {
                let anchor = pair(&raw.required::<Vec<f64>>("pt")?)?;
                let align = TextAlign::from_code(&raw.required::<String>("align")?)?;
                let text = raw.required("text")?;
                let width = raw.field("width")?.unwrap_or_default();
                Ok(Self::Text { anchor, width, align, text })
            }
            "t" => Ok(Self::FontCharacteristics(FontCharacteristics::from_bits(
                raw.field("fontchar")?.unwrap_or_default(),
            ))),
            "c" => Ok(Self::PenColor(color(raw)?)),
            "C" => Ok(Self::FillColor(color(raw)?)),
            "F" => Ok(Self::Font { size: raw.field("size")?.unwrap_or_default(), face: raw.required("face")? }),
            "S" => Ok(Self::Style { name: raw.required("style")? }),
            other => Err(XdotError::UnknownDrawOpcode(other.to_owned())),
        }
    }

    /// The xdot opcode this command decodes from.
    #[must_use]
    pub fn opcode(&self) -> char {
        match self {
            Self::Ellipse { filled: false, .. } => 'e',
            Self::Ellipse { filled: true, .. } => 'E',
            Self::Polygon { filled: false, .. } => 'p',
            Self::Polygon { filled: true, .. } => 'P',
            Self::Polyline { .. } => 'L',
            Self::BSpline { filled: false, .. } => 'b',
            Self::BSpline { filled: true, .. } => 'B',
            Self::Text { .. } => 'T',
            Self::FontCharacteristics(_) => 't',
            Self::PenColor(_) => 'c',
            Self::FillColor(_) => 'C',
            Self::Font { .. } => 'F',
            Self::Style { .. } => 'S',
        }
    }

    /// `true` for commands that change drawing state rather than emit a primitive.
    #[must_use]
    pub fn is_state_change(&self) -> bool {
        matches!(
            self,
            Self::FontCharacteristics(_) | Self::FillColor(_) | Self::PenColor(_) | Self::Font { .. } | Self::Style { .. }
        )
    }
}

impl TryFrom<&RawDrawCommand> for DrawCommand {
    type Error = XdotError;

    fn try_from(raw: &RawDrawCommand) -> Result<Self, Self::Error> {
        Self::decode(raw)
    }
}

/// Decode a command list in order. An absent list decodes to no commands.
///
/// # Errors
///
/// Returns the first error from [`DrawCommand::decode`].
pub fn decode_commands(raw: Option<&[RawDrawCommand]>) -> Result<Vec<DrawCommand>, XdotError> {
    raw.unwrap_or_default().iter().map(DrawCommand::decode).collect()
}

fn pair(values: &[f64]) -> Result<Point, XdotError> {
    match values {
        &[x, y] => Ok(Point::new(x, y)),
        _ => Err(XdotError::malformed(format!("{values:?}"), "point needs exactly two numbers")),
    }
}

fn points(raw: &RawDrawCommand) -> Result<Vec<Point>, XdotError> {
    raw.required::<Vec<Vec<f64>>>("points")?.iter().map(|p| pair(p)).collect()
}

fn color(raw: &RawDrawCommand) -> Result<Color, XdotError> {
    let stops: Vec<RawGradientStop> = raw.field("stops")?.unwrap_or_default();
    Ok(Color {
        color: raw.field("color")?.unwrap_or_default(),
        gradient: raw.field("grad")?,
        stops: stops.into_iter().map(|s| GradientStop { frac: s.frac, color: s.color }).collect(),
    })
}

#[cfg(test)]
#[path = "draw_test.rs"]
mod tests;
