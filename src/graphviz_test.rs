use std::sync::Mutex;

use super::*;

const AB_JSON: &str = r#"{
  "name": "G",
  "directed": true,
  "strict": false,
  "bb": "0,0,54,108",
  "objects": [
    {"name": "a", "_gvid": 0, "pos": "27,90", "height": "0.5", "width": "0.75"},
    {"name": "b", "_gvid": 1, "pos": "27,18", "height": "0.5", "width": "0.75"}
  ],
  "edges": [
    {"_gvid": 0, "tail": 0, "head": 1, "pos": "e,27,36.104 27,71.697 27,63.983 27,54.712 27,46.112"}
  ]
}"#;

/// Records every request and answers with a fixed buffer.
struct FakeBackend {
    reply: Result<Vec<u8>, BackendError>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FakeBackend {
    fn replying(bytes: &[u8]) -> Self {
        Self { reply: Ok(bytes.to_vec()), calls: Mutex::new(Vec::new()) }
    }

    fn failing(err: BackendError) -> Self {
        Self { reply: Err(err), calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<(String, String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl LayoutBackend for FakeBackend {
    fn render(&self, dot: &str, engine: &LayoutEngine, format: &OutputFormat) -> Result<Vec<u8>, BackendError> {
        self.calls.lock().unwrap().push((dot.to_owned(), engine.to_string(), format.to_string()));
        self.reply.clone()
    }
}

// =============================================================================
// NAMES
// =============================================================================

#[test]
fn engine_names_round_trip_through_from_name() {
    for engine in LayoutEngine::all() {
        assert_eq!(LayoutEngine::from_name(engine.as_str()), engine);
    }
    assert_eq!(LayoutEngine::from_name("circo"), LayoutEngine::Circo);
    assert_eq!("patchwork".parse::<LayoutEngine>().unwrap(), LayoutEngine::Patchwork);
}

#[test]
fn unknown_names_are_kept_verbatim() {
    assert_eq!(LayoutEngine::from_name("Dot"), LayoutEngine::Other("Dot".into()));
    assert_eq!(OutputFormat::from_name("svg:cairo").as_str(), "svg:cairo");
}

#[test]
fn format_names_match_graphviz_spelling() {
    assert_eq!(OutputFormat::Xdot14.as_str(), "xdot1.4");
    assert_eq!(OutputFormat::PlainExt.as_str(), "plain-ext");
    assert_eq!(OutputFormat::CmapxNp.to_string(), "cmapx_np");
    assert_eq!(OutputFormat::from_name("json0"), OutputFormat::Json0);
    for format in OutputFormat::all() {
        assert_eq!(OutputFormat::from_name(format.as_str()), format);
    }
}

#[test]
fn binary_formats_are_flagged() {
    assert!(OutputFormat::Png.is_binary());
    assert!(OutputFormat::Svgz.is_binary());
    assert!(!OutputFormat::Svg.is_binary());
    assert!(!OutputFormat::Json.is_binary());
    assert!(!OutputFormat::Other("png:cairo".into()).is_binary());
}

#[test]
fn only_json_and_json0_are_graph_envelopes() {
    let envelopes: Vec<_> = OutputFormat::all().into_iter().filter(OutputFormat::is_graph_envelope).collect();
    assert_eq!(envelopes, vec![OutputFormat::Json, OutputFormat::Json0]);
}

// =============================================================================
// DISPATCH
// =============================================================================

#[test]
fn generate_returns_backend_bytes_unchanged() {
    let bytes = b"\x89PNG\r\n\x1a\n\0\0";
    let gv = GraphViz::new(FakeBackend::replying(bytes));
    let out = gv.generate("digraph { a -> b }", &LayoutEngine::Dot, &OutputFormat::Png).unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn names_are_forwarded_verbatim() {
    let gv = GraphViz::new(FakeBackend::replying(b"ok"));
    gv.generate("graph {}", &LayoutEngine::Other("myengine".into()), &OutputFormat::Other("svg:cairo".into()))
        .unwrap();
    assert_eq!(gv.backend.calls(), vec![("graph {}".into(), "myengine".into(), "svg:cairo".into())]);
}

#[test]
fn layout_requests_json_and_decodes() {
    let gv = GraphViz::new(FakeBackend::replying(AB_JSON.as_bytes()));
    let graph = gv.layout("digraph { a -> b }", &LayoutEngine::Neato).unwrap();

    assert_eq!(graph.nodes().len(), 2);
    assert_eq!(graph.edges().len(), 1);
    let calls = gv.backend.calls();
    assert_eq!(calls[0].1, "neato");
    assert_eq!(calls[0].2, "json");
}

#[test]
fn layout_default_uses_configured_engine_and_format() {
    let config = GraphvizConfig { engine: LayoutEngine::Fdp, json_format: OutputFormat::Json0 };
    let gv = GraphViz::with_config(FakeBackend::replying(AB_JSON.as_bytes()), config);
    gv.layout_default("digraph { a -> b }").unwrap();

    let calls = gv.backend.calls();
    assert_eq!((calls[0].1.as_str(), calls[0].2.as_str()), ("fdp", "json0"));
}

#[test]
fn render_decodes_envelope_formats_only() {
    let gv = GraphViz::new(FakeBackend::replying(AB_JSON.as_bytes()));

    match gv.render("digraph { a -> b }", &LayoutEngine::Dot, &OutputFormat::Json0).unwrap() {
        Output::Graph(graph) => assert_eq!(graph.name(), "G"),
        Output::Raw(_) => panic!("json0 should decode"),
    }
    match gv.render("digraph { a -> b }", &LayoutEngine::Dot, &OutputFormat::DotJson).unwrap() {
        Output::Raw(bytes) => assert_eq!(bytes, AB_JSON.as_bytes()),
        Output::Graph(_) => panic!("dot_json is not a layout envelope"),
    }
}

#[test]
fn backend_failures_surface_with_backend_code() {
    let gv = GraphViz::new(FakeBackend::failing(BackendError::Layout {
        engine: "dot".into(),
        message: "syntax error".into(),
    }));
    let err = gv.layout_default("digraph {").unwrap_err();
    assert!(matches!(err, GraphvizError::Backend(BackendError::Layout { .. })));
    assert_eq!(err.error_code(), "E_BACKEND");
    assert!(!err.retryable());
    assert_eq!(err.to_string(), "layout with engine dot failed: syntax error");
}

#[test]
fn decode_failures_keep_their_code() {
    let gv = GraphViz::new(FakeBackend::replying(b"not json"));
    let err = gv.layout_default("digraph {}").unwrap_err();
    assert!(matches!(err, GraphvizError::Decode(DecodeError::Envelope(_))));
    assert_eq!(err.error_code(), "E_ENVELOPE");
}
