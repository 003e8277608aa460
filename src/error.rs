//! Decode errors with enough context to find the bad record.

use std::fmt;

use xdot::XdotError;

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code and retryable flag.
pub trait ErrorCode: fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

/// The failure classes a decode can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedGeometry,
    UnknownDrawOpcode,
    InvalidAlignment,
    DanglingReference,
    EnvelopeDeserialization,
}

// =============================================================================
// RECORD REFERENCES
// =============================================================================

/// Identifies the envelope record an error came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Graph { name: String },
    Node { gvid: u32, name: String },
    Cluster { gvid: u32, name: String },
    Edge { gvid: u32 },
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graph { name } => write!(f, "graph {name:?}"),
            Self::Node { gvid, name } => write!(f, "node {gvid} ({name:?})"),
            Self::Cluster { gvid, name } => write!(f, "cluster {gvid} ({name:?})"),
            Self::Edge { gvid } => write!(f, "edge {gvid}"),
        }
    }
}

// =============================================================================
// DECODE ERROR
// =============================================================================

/// Terminal error from [`crate::decode_graph`]. No partial graph accompanies it.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The buffer is not JSON or does not have the envelope's shape.
    #[error("failed to deserialize layout envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// A geometry string or draw-command list failed to decode.
    #[error("{record}: field `{field}`: {source}")]
    Field {
        record: RecordRef,
        field: &'static str,
        #[source]
        source: XdotError,
    },

    /// An edge endpoint or cluster member names an id that was never built.
    #[error("{record}: field `{field}` references unknown id {target}")]
    DanglingReference { record: RecordRef, field: &'static str, target: u32 },
}

impl DecodeError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Envelope(_) => ErrorKind::EnvelopeDeserialization,
            Self::Field { source, .. } => match source {
                XdotError::UnknownDrawOpcode(_) => ErrorKind::UnknownDrawOpcode,
                XdotError::InvalidAlignment(_) => ErrorKind::InvalidAlignment,
                XdotError::MalformedGeometry { .. } | XdotError::MissingField { .. } => {
                    ErrorKind::MalformedGeometry
                }
            },
            Self::DanglingReference { .. } => ErrorKind::DanglingReference,
        }
    }

    /// The record the error points at, if it got past envelope deserialization.
    #[must_use]
    pub fn record(&self) -> Option<&RecordRef> {
        match self {
            Self::Envelope(_) => None,
            Self::Field { record, .. } | Self::DanglingReference { record, .. } => Some(record),
        }
    }
}

impl ErrorCode for DecodeError {
    fn error_code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::MalformedGeometry => "E_MALFORMED_GEOMETRY",
            ErrorKind::UnknownDrawOpcode => "E_UNKNOWN_DRAW_OPCODE",
            ErrorKind::InvalidAlignment => "E_INVALID_ALIGNMENT",
            ErrorKind::DanglingReference => "E_DANGLING_REFERENCE",
            ErrorKind::EnvelopeDeserialization => "E_ENVELOPE",
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
