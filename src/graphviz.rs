//! Output dispatcher: the boundary with whatever actually runs Graphviz.
//!
//! DESIGN
//! ======
//! Running a layout engine (process, shared library, platform specifics) is a
//! [`LayoutBackend`]'s job and lives outside this crate. The dispatcher only
//! forwards the engine and format names verbatim and decides what to do with
//! the bytes that come back: hand them over untouched, or decode the JSON
//! envelope into a [`Graph`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::config::GraphvizConfig;
use crate::error::{DecodeError, ErrorCode};
use crate::model::Graph;

// =============================================================================
// ENGINE AND FORMAT NAMES
// =============================================================================

/// Declares an open set of Graphviz names: the known values plus `Other`.
macro_rules! graphviz_names {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal,)+ }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// A name outside the known set, forwarded verbatim.
            Other(String),
        }

        impl $name {
            /// Every known value, in declaration order.
            #[must_use]
            pub fn all() -> Vec<Self> {
                vec![$(Self::$variant),+]
            }

            /// The name Graphviz expects.
            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other(name) => name,
                }
            }

            #[must_use]
            pub fn from_name(name: &str) -> Self {
                match name {
                    $($text => Self::$variant,)+
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from_name(s))
            }
        }
    };
}

graphviz_names! {
    /// A Graphviz layout engine (`-K`).
    LayoutEngine {
        Dot => "dot",
        Neato => "neato",
        Fdp => "fdp",
        Sfdp => "sfdp",
        Circo => "circo",
        Twopi => "twopi",
        Nop => "nop",
        Nop2 => "nop2",
        Osage => "osage",
        Patchwork => "patchwork",
    }
}

graphviz_names! {
    /// A Graphviz output format (`-T`).
    OutputFormat {
        Canon => "canon",
        Dot => "dot",
        Gv => "gv",
        Xdot => "xdot",
        Xdot12 => "xdot1.2",
        Xdot14 => "xdot1.4",
        Eps => "eps",
        Fig => "fig",
        Imap => "imap",
        ImapNp => "imap_np",
        Ismap => "ismap",
        Cmap => "cmap",
        Cmapx => "cmapx",
        CmapxNp => "cmapx_np",
        Json => "json",
        Json0 => "json0",
        DotJson => "dot_json",
        XdotJson => "xdot_json",
        Pic => "pic",
        Plain => "plain",
        PlainExt => "plain-ext",
        Pov => "pov",
        Ps => "ps",
        Ps2 => "ps2",
        Svg => "svg",
        Vrml => "vrml",
        Tk => "tk",
        Bmp => "bmp",
        Gd => "gd",
        Gd2 => "gd2",
        Gif => "gif",
        Jpg => "jpg",
        Jpeg => "jpeg",
        Jpe => "jpe",
        Pdf => "pdf",
        Png => "png",
        Svgz => "svgz",
        Tif => "tif",
        Tiff => "tiff",
        Wbmp => "wbmp",
        Webp => "webp",
    }
}

impl OutputFormat {
    /// Formats whose output is not text. `Other` names are assumed textual.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::Bmp
                | Self::Gd
                | Self::Gd2
                | Self::Gif
                | Self::Jpg
                | Self::Jpeg
                | Self::Jpe
                | Self::Pdf
                | Self::Png
                | Self::Svgz
                | Self::Tif
                | Self::Tiff
                | Self::Wbmp
                | Self::Webp
        )
    }

    /// Formats that produce the JSON envelope [`crate::decode_graph`] reads.
    #[must_use]
    pub fn is_graph_envelope(&self) -> bool {
        matches!(self, Self::Json | Self::Json0)
    }
}

// =============================================================================
// BACKEND
// =============================================================================

/// Failure reported by a [`LayoutBackend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The DOT source could not be read.
    #[error("unable to read graph description: {0}")]
    InvalidGraph(String),
    /// The engine failed to lay the graph out.
    #[error("layout with engine {engine} failed: {message}")]
    Layout { engine: String, message: String },
    /// The laid-out graph could not be rendered in the requested format.
    #[error("rendering {format} failed: {message}")]
    Render { format: String, message: String },
}

/// Runs a Graphviz layout and returns the rendered bytes.
///
/// Implementations receive engine and format names exactly as the caller gave
/// them and must return the complete output buffer.
pub trait LayoutBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the layout or rendering fails.
    fn render(&self, dot: &str, engine: &LayoutEngine, format: &OutputFormat) -> Result<Vec<u8>, BackendError>;
}

// =============================================================================
// DISPATCHER
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum GraphvizError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ErrorCode for GraphvizError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Backend(_) => "E_BACKEND",
            Self::Decode(e) => e.error_code(),
        }
    }
}

/// Result of [`GraphViz::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Bytes exactly as the backend produced them.
    Raw(Vec<u8>),
    /// The decoded JSON envelope.
    Graph(Box<Graph>),
}

/// Front door: forwards requests to a backend and decodes JSON results.
pub struct GraphViz<B> {
    backend: B,
    config: GraphvizConfig,
}

impl<B: LayoutBackend> GraphViz<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, GraphvizConfig::default())
    }

    #[must_use]
    pub fn with_config(backend: B, config: GraphvizConfig) -> Self {
        Self { backend, config }
    }

    #[must_use]
    pub fn config(&self) -> &GraphvizConfig {
        &self.config
    }

    /// Render `dot` in any format and return the bytes unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`GraphvizError::Backend`] when the backend fails.
    pub fn generate(&self, dot: &str, engine: &LayoutEngine, format: &OutputFormat) -> Result<Vec<u8>, GraphvizError> {
        debug!(%engine, %format, "rendering raw output");
        Ok(self.backend.render(dot, engine, format)?)
    }

    /// Lay `dot` out with `engine` and decode the result into a [`Graph`].
    ///
    /// Requests the configured JSON format (`json` unless overridden).
    ///
    /// # Errors
    ///
    /// Returns [`GraphvizError::Backend`] when the backend fails and
    /// [`GraphvizError::Decode`] when its output does not decode.
    pub fn layout(&self, dot: &str, engine: &LayoutEngine) -> Result<Graph, GraphvizError> {
        self.decode(dot, engine, &self.config.json_format)
    }

    /// [`GraphViz::layout`] with the configured engine.
    ///
    /// # Errors
    ///
    /// Same as [`GraphViz::layout`].
    pub fn layout_default(&self, dot: &str) -> Result<Graph, GraphvizError> {
        self.layout(dot, &self.config.engine)
    }

    /// Render `dot`, decoding the result when `format` is a JSON envelope
    /// format and returning raw bytes otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`GraphViz::layout`].
    pub fn render(&self, dot: &str, engine: &LayoutEngine, format: &OutputFormat) -> Result<Output, GraphvizError> {
        if format.is_graph_envelope() {
            Ok(Output::Graph(Box::new(self.decode(dot, engine, format)?)))
        } else {
            Ok(Output::Raw(self.generate(dot, engine, format)?))
        }
    }

    fn decode(&self, dot: &str, engine: &LayoutEngine, format: &OutputFormat) -> Result<Graph, GraphvizError> {
        debug!(%engine, %format, "rendering layout graph");
        let bytes = self.backend.render(dot, engine, format)?;
        Ok(crate::decode_graph(&bytes)?)
    }
}

#[cfg(test)]
#[path = "graphviz_test.rs"]
mod tests;
