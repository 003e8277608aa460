use super::*;

fn field_error(source: XdotError) -> DecodeError {
    DecodeError::Field { record: RecordRef::Node { gvid: 3, name: "a".into() }, field: "pos", source }
}

#[test]
fn record_refs_render_kind_id_and_name() {
    assert_eq!(RecordRef::Graph { name: "G".into() }.to_string(), "graph \"G\"");
    assert_eq!(RecordRef::Node { gvid: 3, name: "a".into() }.to_string(), "node 3 (\"a\")");
    assert_eq!(RecordRef::Cluster { gvid: 0, name: "cluster_x".into() }.to_string(), "cluster 0 (\"cluster_x\")");
    assert_eq!(RecordRef::Edge { gvid: 7 }.to_string(), "edge 7");
}

#[test]
fn field_errors_classify_by_source() {
    let malformed = field_error(XdotError::MalformedGeometry { input: "1".into(), reason: "r".into() });
    assert_eq!(malformed.kind(), ErrorKind::MalformedGeometry);
    assert_eq!(malformed.error_code(), "E_MALFORMED_GEOMETRY");

    let missing = field_error(XdotError::MissingField { op: "e".into(), field: "rect" });
    assert_eq!(missing.kind(), ErrorKind::MalformedGeometry);

    let opcode = field_error(XdotError::UnknownDrawOpcode("Q".into()));
    assert_eq!(opcode.kind(), ErrorKind::UnknownDrawOpcode);
    assert_eq!(opcode.error_code(), "E_UNKNOWN_DRAW_OPCODE");

    let align = field_error(XdotError::InvalidAlignment("x".into()));
    assert_eq!(align.kind(), ErrorKind::InvalidAlignment);
    assert_eq!(align.error_code(), "E_INVALID_ALIGNMENT");
}

#[test]
fn field_error_message_names_record_and_field() {
    let err = field_error(XdotError::UnknownDrawOpcode("Q".into()));
    assert_eq!(err.to_string(), "node 3 (\"a\"): field `pos`: unknown draw opcode `Q`");
    assert_eq!(err.record(), Some(&RecordRef::Node { gvid: 3, name: "a".into() }));
}

#[test]
fn dangling_reference_message_names_target() {
    let err = DecodeError::DanglingReference { record: RecordRef::Edge { gvid: 2 }, field: "head", target: 9 };
    assert_eq!(err.to_string(), "edge 2: field `head` references unknown id 9");
    assert_eq!(err.kind(), ErrorKind::DanglingReference);
    assert_eq!(err.error_code(), "E_DANGLING_REFERENCE");
    assert!(!err.retryable());
}

#[test]
fn envelope_errors_have_no_record() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("bad json");
    let err = DecodeError::from(json_err);
    assert_eq!(err.kind(), ErrorKind::EnvelopeDeserialization);
    assert_eq!(err.error_code(), "E_ENVELOPE");
    assert!(err.record().is_none());
    assert!(err.to_string().starts_with("failed to deserialize layout envelope"));
}
