//! Rendering tests — SVG output, JSON options and the C entry points.

use std::ffi::{CStr, CString};
use std::path::PathBuf;

use fretlib::{
    closest_fret_json, fretlib_closest_fret_json, fretlib_free_string, fretlib_render_json,
    options_from_json, render_fretboard_to_svg, render_json_to_svg, Dot, FretboardError,
    FretboardOptions,
};
use pretty_assertions::assert_eq;

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn count_tag(doc: &roxmltree::Document, tag: &str) -> usize {
    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == tag)
        .count()
}

#[test]
fn render_default_fretboard_svg() {
    let opts = FretboardOptions::default()
        .with_dot(Dot::colored(1, 0, "red"))
        .with_dot(Dot::colored(5, 3, "black"));
    let svg = render_fretboard_to_svg(opts).expect("Failed to render");

    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");

    let doc = roxmltree::Document::parse(&svg).expect("SVG should be well-formed XML");
    let root = doc.root_element();
    assert_eq!(root.tag_name().name(), "svg");
    assert_eq!(root.tag_name().namespace(), Some("http://www.w3.org/2000/svg"));
    assert_eq!(root.attribute("width"), Some("200"));
    assert_eq!(root.attribute("height"), Some("300"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 200 300"));

    assert_eq!(count_tag(&doc, "line"), 11);
    assert_eq!(count_tag(&doc, "circle"), 2);

    let fills: Vec<&str> = doc
        .descendants()
        .filter(|n| n.tag_name().name() == "circle")
        .filter_map(|n| n.attribute("fill"))
        .collect();
    assert_eq!(fills, vec!["red", "black"]);

    let out = output_dir().join("default-fretboard.svg");
    std::fs::write(&out, &svg).expect("Failed to write SVG");
    println!("✓ Rendered default-fretboard.svg ({} bytes)", svg.len());
}

#[test]
fn rendered_geometry_matches_layout() {
    let svg = render_fretboard_to_svg(FretboardOptions::default()).unwrap();
    let doc = roxmltree::Document::parse(&svg).unwrap();

    // First string line sits at the left margin and spans the neck.
    let first = doc
        .descendants()
        .find(|n| n.tag_name().name() == "line")
        .unwrap();
    assert_eq!(first.attribute("x1"), Some("33.333"));
    assert_eq!(first.attribute("y1"), Some("37.5"));
    assert_eq!(first.attribute("y2"), Some("262.5"));
    assert_eq!(first.attribute("stroke"), Some("black"));
}

#[test]
fn json_options_merge_over_defaults() {
    let opts = options_from_json(
        r#"{
            "startFret": 5,
            "endFret": 8,
            "dotColor": "teal",
            "drawDotOnHover": true,
            "dots": [{"string": 2, "fret": 6}, {"string": 3, "fret": 7, "color": "blue"}]
        }"#,
    )
    .expect("valid JSON");

    assert_eq!(opts.width, 200.0);
    assert_eq!(opts.height, 300.0);
    assert_eq!(opts.start_fret, 5);
    assert_eq!(opts.end_fret, 8);
    assert_eq!(opts.string_names, vec!["E", "B", "G", "D", "A", "E"]);
    assert_eq!(opts.hover_dot_color, "white");
    assert!(opts.draw_dot_on_hover);
    assert!(opts.show_fret_nums);
    assert!(!opts.show_string_names);
    assert_eq!(opts.dots, vec![Dot::new(2, 6), Dot::colored(3, 7, "blue")]);
    assert!(opts.on_click.is_none());

    let svg = render_fretboard_to_svg(opts).unwrap();
    assert!(svg.contains(r#"fill="teal""#));
    assert!(svg.contains(r#"fill="blue""#));
}

#[test]
fn label_flags_do_not_change_output() {
    let plain = render_json_to_svg("{}").unwrap();
    let flagged = render_json_to_svg(r#"{"showFretNums": false, "showStringNames": true}"#).unwrap();
    assert_eq!(plain, flagged);
    assert!(!plain.contains("<text"));
}

#[test]
fn bad_json_and_bad_options_are_distinct_errors() {
    let err = render_json_to_svg("{not json").unwrap_err();
    assert!(matches!(err, FretboardError::Json(_)));

    let err = render_json_to_svg(r#"{"stringNames": ["E"]}"#).unwrap_err();
    assert!(matches!(err, FretboardError::InvalidConfiguration(_)));
}

#[test]
fn control_characters_in_colors_are_rejected() {
    for json in [
        r#"{"dots": [{"string": 1, "fret": 1, "color": "a\u0000b"}]}"#,
        r#"{"dotColor": "red\n"}"#,
        r#"{"hoverDotColor": "\u001bblue"}"#,
    ] {
        let err = render_json_to_svg(json).unwrap_err();
        assert!(matches!(err, FretboardError::InvalidConfiguration(_)), "{json}: {err}");
    }

    let opts = FretboardOptions::default().with_dot(Dot::colored(2, 2, "#ff0000"));
    let svg = render_fretboard_to_svg(opts).unwrap();
    assert!(roxmltree::Document::parse(&svg).is_ok());
    assert!(svg.contains(r##"fill="#ff0000""##));
}

#[test]
fn closest_fret_json_reports_coordinate() {
    // Default layout: string 3 sits at x = 3 * string_margin + x_margin,
    // fret 2 is centered at y = 1.5 * fret_height + y_margin.
    let x = 3.0 * (200.0 - 2.0 * 200.0 / 6.0) / 5.0 + 200.0 / 6.0;
    let y = 1.5 * 56.25 + 37.5;
    assert_eq!(closest_fret_json("{}", x, y).unwrap(), r#"{"string":3,"fret":2}"#);
}

#[test]
fn c_entry_points_round_trip_strings() {
    let opts = CString::new(r#"{"endFret": 5}"#).unwrap();

    unsafe {
        let svg_ptr = fretlib_render_json(opts.as_ptr());
        assert!(!svg_ptr.is_null());
        let svg = CStr::from_ptr(svg_ptr).to_str().unwrap().to_owned();
        fretlib_free_string(svg_ptr);
        // 6 strings + 6 fret boundaries
        assert_eq!(svg.matches("<line").count(), 12);

        let coord_ptr = fretlib_closest_fret_json(opts.as_ptr(), 0.0, 0.0);
        assert!(!coord_ptr.is_null());
        let coord = CStr::from_ptr(coord_ptr).to_str().unwrap().to_owned();
        fretlib_free_string(coord_ptr);
        assert_eq!(coord, r#"{"string":6,"fret":0}"#);
    }
}

#[test]
fn c_entry_points_return_null_on_error() {
    let bad = CString::new(r#"{"startFret": 9, "endFret": 2}"#).unwrap();
    let nul_color = CString::new(r#"{"dots": [{"string": 1, "fret": 0, "color": "a\u0000b"}]}"#).unwrap();
    unsafe {
        assert!(fretlib_render_json(nul_color.as_ptr()).is_null());
        assert!(fretlib_render_json(std::ptr::null()).is_null());
        assert!(fretlib_render_json(bad.as_ptr()).is_null());
        assert!(fretlib_closest_fret_json(bad.as_ptr(), 1.0, 1.0).is_null());
        fretlib_free_string(std::ptr::null_mut());
    }
}
