//! The JSON document Graphviz writes for `-Tjson` / `-Tjson0`.
//!
//! DESIGN
//! ======
//! These types mirror the engine's output loosely. Graphviz writes most
//! attribute values as JSON strings (`"height": "0.5"`) while the `directed`
//! and `strict` flags come out as booleans, so the numeric and flag fields
//! accept either encoding. Geometry strings stay raw here; the assembler
//! decodes them so failures can name the record they came from.
//!
//! Required shape: top-level `name` and `bb`, per object `name` and `_gvid`,
//! per edge `_gvid`, `tail` and `head`. Everything else may be absent.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use xdot::RawDrawCommand;

/// Top-level graph record.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    pub name: String,
    pub bb: String,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub lp: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub directed: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub strict: bool,
    /// Subgraphs first, then nodes, in `_gvid` order. Omitted when empty.
    #[serde(default)]
    pub objects: Vec<RawObject>,
    #[serde(default)]
    pub edges: Vec<RawEdge>,
    #[serde(default, rename = "_draw_")]
    pub draw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_ldraw_")]
    pub ldraw: Option<Vec<RawDrawCommand>>,
}

/// An entry of `objects`: either a node or a subgraph placeholder.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawObject {
    pub name: String,
    #[serde(rename = "_gvid")]
    pub gvid: u32,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    /// Member object ids (subgraphs only).
    #[serde(default)]
    pub nodes: Option<Vec<u32>>,
    /// Member edge ids (subgraphs only).
    #[serde(default)]
    pub edges: Option<Vec<u32>>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub bb: Option<String>,
    #[serde(default)]
    pub lp: Option<String>,
    #[serde(default)]
    pub shape: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub height: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_f64")]
    pub width: f64,
    #[serde(default, deserialize_with = "deserialize_lenient_opt_f64")]
    pub lheight: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_lenient_opt_f64")]
    pub lwidth: Option<f64>,
    #[serde(default, rename = "_draw_")]
    pub draw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_ldraw_")]
    pub ldraw: Option<Vec<RawDrawCommand>>,
}

/// An entry of `edges`. `tail` and `head` are object `_gvid`s.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawEdge {
    #[serde(rename = "_gvid")]
    pub gvid: u32,
    pub tail: u32,
    pub head: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default, rename = "_draw_")]
    pub draw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_ldraw_")]
    pub ldraw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_hdraw_")]
    pub hdraw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_tdraw_")]
    pub tdraw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_hldraw_")]
    pub hldraw: Option<Vec<RawDrawCommand>>,
    #[serde(default, rename = "_tldraw_")]
    pub tldraw: Option<Vec<RawDrawCommand>>,
}

impl Envelope {
    /// Deserialize an envelope from a complete UTF-8 JSON buffer.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON or a missing
    /// required field.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// A flag is set iff its value is the boolean `true` or the string `"true"`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Bool(flag) => flag,
        serde_json::Value::String(text) => text == "true",
        _ => false,
    })
}

fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_lenient_opt_f64(deserializer).map(Option::unwrap_or_default)
}

fn deserialize_lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => {
            number.as_f64().map(Some).ok_or_else(|| D::Error::custom("expected finite number"))
        }
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("expected numeric string, got `{text}`"))),
        _ => Err(D::Error::custom("expected number or numeric string")),
    }
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
