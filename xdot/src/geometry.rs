//! Parsers for the string-encoded geometry Graphviz attaches to layouts.
//!
//! FORMATS
//! =======
//! - point: `"x,y"`
//! - bounding box: `"x0,y0,x1,y1"` (lower-left then upper-right corner)
//! - spline: whitespace-separated points, where `s,x,y` marks the start
//!   arrow tip and `e,x,y` the end arrow tip. Control points keep source order.
//!
//! Numbers use `.` as the decimal separator regardless of locale.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::XdotError;

/// Token prefix marking the arrow tip at the start of a spline.
pub const START_ARROW_PREFIX: &str = "s,";

/// Token prefix marking the arrow tip at the end of a spline.
pub const END_ARROW_PREFIX: &str = "e,";

// =============================================================================
// POINT
// =============================================================================

/// A position in layout coordinates (points, y growing upwards).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = XdotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_point(s)
    }
}

/// Parse an `"x,y"` pair.
///
/// # Errors
///
/// Returns [`XdotError::MalformedGeometry`] unless the input is exactly two
/// comma-separated floating-point literals.
pub fn parse_point(s: &str) -> Result<Point, XdotError> {
    point_from(s, s)
}

/// Parse `text` as a point, reporting failures against `input`.
fn point_from(input: &str, text: &str) -> Result<Point, XdotError> {
    let mut parts = text.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(XdotError::malformed(input, "expected two comma-separated coordinates"));
    };
    Ok(Point::new(coordinate(input, x)?, coordinate(input, y)?))
}

fn coordinate(input: &str, token: &str) -> Result<f64, XdotError> {
    token
        .parse::<f64>()
        .map_err(|_| XdotError::malformed(input, format!("`{token}` is not a number")))
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

/// Axis-aligned box given by two corners.
///
/// The corners are kept exactly as emitted; `top_right` is not required to
/// dominate `bottom_left`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BoundingBox {
    pub bottom_left: Point,
    pub top_right: Point,
}

impl BoundingBox {
    #[must_use]
    pub const fn new(bottom_left: Point, top_right: Point) -> Self {
        Self { bottom_left, top_right }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.bottom_left, self.top_right)
    }
}

impl FromStr for BoundingBox {
    type Err = XdotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_bounding_box(s)
    }
}

/// Parse an `"x0,y0,x1,y1"` box.
///
/// # Errors
///
/// Returns [`XdotError::MalformedGeometry`] unless the input is exactly four
/// comma-separated floating-point literals.
pub fn parse_bounding_box(s: &str) -> Result<BoundingBox, XdotError> {
    let tokens: Vec<&str> = s.split(',').collect();
    let &[x0, y0, x1, y1] = tokens.as_slice() else {
        return Err(XdotError::malformed(
            s,
            format!("expected four comma-separated coordinates, found {}", tokens.len()),
        ));
    };
    Ok(BoundingBox::new(
        Point::new(coordinate(s, x0)?, coordinate(s, y0)?),
        Point::new(coordinate(s, x1)?, coordinate(s, y1)?),
    ))
}

// =============================================================================
// SPLINE
// =============================================================================

/// The rendered path of an edge.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Spline {
    pub start_arrow_tip: Option<Point>,
    pub end_arrow_tip: Option<Point>,
    /// B-spline control points in render order.
    pub control_points: Vec<Point>,
}

impl fmt::Display for Spline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tokens = Vec::with_capacity(self.control_points.len() + 2);
        if let Some(tip) = self.start_arrow_tip {
            tokens.push(format!("{START_ARROW_PREFIX}{tip}"));
        }
        if let Some(tip) = self.end_arrow_tip {
            tokens.push(format!("{END_ARROW_PREFIX}{tip}"));
        }
        tokens.extend(self.control_points.iter().map(Point::to_string));
        f.write_str(&tokens.join(" "))
    }
}

impl FromStr for Spline {
    type Err = XdotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_spline(s)
    }
}

/// Parse an edge `pos` spline.
///
/// A repeated `s,` or `e,` token overwrites the earlier tip.
///
/// # Errors
///
/// Returns [`XdotError::MalformedGeometry`] for the first token that is
/// neither an arrow tip nor a two-component point.
pub fn parse_spline(s: &str) -> Result<Spline, XdotError> {
    let mut spline = Spline::default();
    for token in s.split_whitespace() {
        if let Some(rest) = token.strip_prefix(START_ARROW_PREFIX) {
            spline.start_arrow_tip = Some(point_from(token, rest)?);
        } else if let Some(rest) = token.strip_prefix(END_ARROW_PREFIX) {
            spline.end_arrow_tip = Some(point_from(token, rest)?);
        } else {
            spline.control_points.push(point_from(token, token)?);
        }
    }
    Ok(spline)
}

#[cfg(test)]
#[path = "geometry_test.rs"]
mod tests;
