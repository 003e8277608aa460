use super::*;

// =============================================================================
// POINT
// =============================================================================

#[test]
fn parse_point_reads_integer_and_fractional_coordinates() {
    assert_eq!(parse_point("27,18").expect("point"), Point::new(27.0, 18.0));
    assert_eq!(parse_point("-3.5,101.27").expect("point"), Point::new(-3.5, 101.27));
    assert_eq!(parse_point("1e2,.5").expect("point"), Point::new(100.0, 0.5));
}

#[test]
fn parse_point_display_round_trips_source_text() {
    for input in ["27,18", "99.5,-12.25", "0,0", "1234.567,0.001"] {
        let point = parse_point(input).expect("point");
        assert_eq!(point.to_string(), input);
    }
}

#[test]
fn parse_point_rejects_wrong_token_count() {
    for input in ["", "27", "1,2,3", "27,18!", ","] {
        let err = parse_point(input).expect_err("should fail");
        assert!(matches!(err, XdotError::MalformedGeometry { .. }), "{input}: {err:?}");
    }
}

#[test]
fn parse_point_rejects_locale_decimal_comma_and_text() {
    let err = parse_point("1;5,2").expect_err("should fail");
    assert_eq!(
        err,
        XdotError::MalformedGeometry { input: "1;5,2".into(), reason: "`1;5` is not a number".into() }
    );
    assert!(parse_point("a,b").is_err());
    assert!(parse_point(" 1,2").is_err());
}

#[test]
fn point_from_str_matches_parse_point() {
    let point: Point = "4,5".parse().expect("point");
    assert_eq!(point, Point::new(4.0, 5.0));
}

// =============================================================================
// BOUNDING BOX
// =============================================================================

#[test]
fn parse_bounding_box_reads_corners_in_order() {
    let bb = parse_bounding_box("0,0,62,108").expect("bb");
    assert_eq!(bb.bottom_left, Point::new(0.0, 0.0));
    assert_eq!(bb.top_right, Point::new(62.0, 108.0));
    assert!((bb.width() - 62.0).abs() < f64::EPSILON);
    assert!((bb.height() - 108.0).abs() < f64::EPSILON);
    assert_eq!(bb.to_string(), "0,0,62,108");
}

#[test]
fn parse_bounding_box_accepts_inverted_corners() {
    let bb = parse_bounding_box("10,10,2,3").expect("bb");
    assert_eq!(bb.bottom_left, Point::new(10.0, 10.0));
    assert_eq!(bb.top_right, Point::new(2.0, 3.0));
    assert!(bb.width() < 0.0);
}

#[test]
fn parse_bounding_box_rejects_wrong_token_count() {
    let err = parse_bounding_box("0,0,62").expect_err("should fail");
    let XdotError::MalformedGeometry { reason, .. } = err else {
        panic!("expected MalformedGeometry");
    };
    assert!(reason.contains("found 3"));
    assert!(parse_bounding_box("0,0,1,1,2").is_err());
    assert!(parse_bounding_box("").is_err());
}

#[test]
fn parse_bounding_box_rejects_non_numeric_token() {
    assert!(matches!(parse_bounding_box("0,0,x,1"), Err(XdotError::MalformedGeometry { .. })));
}

// =============================================================================
// SPLINE
// =============================================================================

#[test]
fn parse_spline_splits_arrow_tips_from_control_points() {
    let spline =
        parse_spline("e,27,36.104 27,71.697 27,63.983 27,54.712 27,46.112").expect("spline");
    assert_eq!(spline.start_arrow_tip, None);
    assert_eq!(spline.end_arrow_tip, Some(Point::new(27.0, 36.104)));
    assert_eq!(
        spline.control_points,
        vec![
            Point::new(27.0, 71.697),
            Point::new(27.0, 63.983),
            Point::new(27.0, 54.712),
            Point::new(27.0, 46.112),
        ]
    );
}

#[test]
fn parse_spline_with_both_tips_keeps_remaining_tokens_in_order() {
    let spline = parse_spline("s,76.067,220 e,201.42,103.3 82.756,210.74 96.784,191.68 117.56,165.65")
        .expect("spline");
    assert_eq!(spline.start_arrow_tip, Some(Point::new(76.067, 220.0)));
    assert_eq!(spline.end_arrow_tip, Some(Point::new(201.42, 103.3)));
    assert_eq!(spline.control_points.len(), 3);
    assert_eq!(spline.control_points[0], Point::new(82.756, 210.74));
    assert_eq!(spline.control_points[2], Point::new(117.56, 165.65));
}

#[test]
fn parse_spline_tips_are_found_by_prefix_not_position() {
    let spline = parse_spline("1,1 s,0,0 2,2 e,3,3 4,4").expect("spline");
    assert_eq!(spline.start_arrow_tip, Some(Point::new(0.0, 0.0)));
    assert_eq!(spline.end_arrow_tip, Some(Point::new(3.0, 3.0)));
    assert_eq!(
        spline.control_points,
        vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(4.0, 4.0)]
    );
}

#[test]
fn parse_spline_without_tips_treats_every_token_as_control_point() {
    let spline = parse_spline("1,2 3,4 5,6 7,8").expect("spline");
    assert!(spline.start_arrow_tip.is_none());
    assert!(spline.end_arrow_tip.is_none());
    assert_eq!(spline.control_points.len(), 4);
}

#[test]
fn parse_spline_collapses_whitespace_runs() {
    let spline = parse_spline("  1,2 \t 3,4\n5,6  ").expect("spline");
    assert_eq!(spline.control_points.len(), 3);
}

#[test]
fn parse_spline_last_repeated_tip_wins() {
    let spline = parse_spline("e,1,1 e,9,9 0,0").expect("spline");
    assert_eq!(spline.end_arrow_tip, Some(Point::new(9.0, 9.0)));
}

#[test]
fn parse_spline_empty_input_is_an_empty_path() {
    let spline = parse_spline("").expect("spline");
    assert_eq!(spline, Spline::default());
}

#[test]
fn parse_spline_rejects_unknown_prefix_and_bad_tip() {
    let err = parse_spline("x,1,2 3,4").expect_err("should fail");
    assert_eq!(
        err,
        XdotError::MalformedGeometry {
            input: "x,1,2".into(),
            reason: "expected two comma-separated coordinates".into(),
        }
    );
    assert!(parse_spline("s,1 3,4").is_err());
    assert!(parse_spline("e,a,b").is_err());
}

#[test]
fn spline_display_emits_tips_then_control_points() {
    let input = "s,1,2 e,3,4 5,6 7,8";
    let spline = parse_spline(input).expect("spline");
    assert_eq!(spline.to_string(), input);
    assert_eq!(parse_spline(&spline.to_string()).expect("reparse"), spline);
}
