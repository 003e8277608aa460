//! Typed, cross-referenced model of Graphviz layout output.
//!
//! Graphviz's `-Tjson` / `-Tjson0` renderers describe a laid-out graph as a
//! flat JSON document: objects and edges keyed by integer `_gvid`s, geometry
//! packed into strings, drawing instructions as xdot records. [`decode_graph`]
//! turns that document into a [`Graph`] whose edges point at real nodes and
//! whose clusters list real members, or fails without a partial result.
//!
//! Producing the document is a [`LayoutBackend`]'s job; [`GraphViz`] wires a
//! backend to the decoder.

pub mod assemble;
pub mod config;
pub mod envelope;
pub mod error;
pub mod graphviz;
pub mod model;

pub use config::{ConfigError, GraphvizConfig};
pub use envelope::Envelope;
pub use error::{DecodeError, ErrorCode, ErrorKind, RecordRef};
pub use graphviz::{BackendError, GraphViz, GraphvizError, LayoutBackend, LayoutEngine, Output, OutputFormat};
pub use model::{Cluster, ClusterId, Edge, EdgeId, Graph, Node, NodeId};
pub use xdot;

/// Decode a complete Graphviz JSON buffer into a [`Graph`].
///
/// # Errors
///
/// Returns [`DecodeError::Envelope`] when the buffer is not a well-formed
/// envelope, and the first field or reference failure found during assembly
/// otherwise.
pub fn decode_graph(bytes: &[u8]) -> Result<Graph, DecodeError> {
    let envelope = Envelope::from_slice(bytes)?;
    assemble::assemble(&envelope)
}

/// [`decode_graph`] for text already held as a string.
///
/// # Errors
///
/// Same as [`decode_graph`].
pub fn decode_graph_str(json: &str) -> Result<Graph, DecodeError> {
    decode_graph(json.as_bytes())
}
