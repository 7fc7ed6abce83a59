//! Validation tests for plated hole records.
//!
//! Each test feeds a JSON record through the public validator and checks the
//! canonical result or the reported error.

use pcb_schema::ids::CounterIdGenerator;
use pcb_schema::layer::LayerRef;
use pcb_schema::pcb::{parse_plated_hole, OvalShape, PcbPlatedHole, PlatedHoleShape};
use pcb_schema::SchemaError;
use serde_json::{json, Value};

fn minimal_circle() -> Value {
    json!({
        "type": "pcb_plated_hole",
        "shape": "circle",
        "outer_diameter": 2,
        "hole_diameter": 1,
        "x": 0,
        "y": 0,
        "layers": ["top"]
    })
}

fn minimal_oval(shape: &str) -> Value {
    json!({
        "type": "pcb_plated_hole",
        "shape": shape,
        "outer_width": 3,
        "outer_height": 2,
        "hole_width": 2,
        "hole_height": 1,
        "x": 1,
        "y": 1,
        "layers": ["top", "bottom"]
    })
}

fn minimal_circular_hole_with_rect_pad() -> Value {
    json!({
        "type": "pcb_plated_hole",
        "shape": "circular_hole_with_rect_pad",
        "hole_shape": "circle",
        "pad_shape": "rect",
        "hole_diameter": 1,
        "rect_pad_width": 1.8,
        "rect_pad_height": 1.8,
        "x": 0,
        "y": 2.54,
        "layers": ["top", "bottom"]
    })
}

fn minimal_pill_hole_with_rect_pad() -> Value {
    json!({
        "type": "pcb_plated_hole",
        "shape": "pill_hole_with_rect_pad",
        "hole_shape": "pill",
        "pad_shape": "rect",
        "hole_width": 1.2,
        "hole_height": 0.6,
        "rect_pad_width": 2,
        "rect_pad_height": 1.2,
        "x": -5,
        "y": 0,
        "layers": ["top"]
    })
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

// =============================================================================
// Minimal records for every variant
// =============================================================================

#[test]
fn test_minimal_records_validate() {
    let ids = CounterIdGenerator::new();
    let cases = [
        (minimal_circle(), PlatedHoleShape::Circle),
        (minimal_oval("oval"), PlatedHoleShape::Oval),
        (minimal_oval("pill"), PlatedHoleShape::Pill),
        (
            minimal_circular_hole_with_rect_pad(),
            PlatedHoleShape::CircularHoleWithRectPad,
        ),
        (
            minimal_pill_hole_with_rect_pad(),
            PlatedHoleShape::PillHoleWithRectPad,
        ),
    ];

    for (input, expected_shape) in cases {
        let hole = parse_plated_hole(&input, &ids).expect("minimal record should validate");
        assert_eq!(hole.shape(), expected_shape);

        let output = serde_json::to_value(&hole).unwrap();
        assert_eq!(output["type"], input["type"]);
        assert_eq!(output["shape"], input["shape"]);
        assert_eq!(output.get("hole_shape"), input.get("hole_shape"));
        assert_eq!(output.get("pad_shape"), input.get("pad_shape"));
    }
}

#[test]
fn test_circle_example_gets_generated_id() {
    let ids = CounterIdGenerator::new();
    let hole = parse_plated_hole(&minimal_circle(), &ids).unwrap();

    assert!(hole.id().starts_with("pcb_plated_hole_"));
    let PcbPlatedHole::Circle(circle) = &hole else {
        panic!("expected circle, got {hole:?}");
    };
    assert_close(circle.outer_diameter, 2.0);
    assert_close(circle.hole_diameter, 1.0);
    assert_eq!(circle.common.layers, vec![LayerRef::Top]);

    let output = serde_json::to_value(&hole).unwrap();
    assert_eq!(output["shape"], "circle");
    assert_eq!(output["pcb_plated_hole_id"], hole.id());
    // Absent optional fields stay absent
    assert!(output.get("port_hints").is_none());
    assert!(output.get("pcb_component_id").is_none());
}

#[test]
fn test_oval_keeps_spelling() {
    let ids = CounterIdGenerator::new();
    let hole = parse_plated_hole(&minimal_oval("pill"), &ids).unwrap();
    let PcbPlatedHole::Oval(oval) = hole else {
        panic!("expected oval variant");
    };
    assert_eq!(oval.shape, OvalShape::Pill);
}

#[test]
fn test_optional_fields_are_carried() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["pcb_plated_hole_id"] = json!("pcb_plated_hole_pin1");
    input["port_hints"] = json!(["1", "VCC"]);
    input["pcb_component_id"] = json!("pcb_component_3");
    input["pcb_port_id"] = json!("pcb_port_9");
    input["pcb_group_id"] = json!("group_a");
    input["subcircuit_id"] = json!("subcircuit_1");

    let hole = parse_plated_hole(&input, &ids).unwrap();
    let common = hole.common();
    assert_eq!(hole.id(), "pcb_plated_hole_pin1");
    assert_eq!(
        common.port_hints,
        Some(vec!["1".to_string(), "VCC".to_string()])
    );
    assert_eq!(common.pcb_component_id.as_deref(), Some("pcb_component_3"));
    assert_eq!(common.pcb_port_id.as_deref(), Some("pcb_port_9"));
    assert_eq!(common.pcb_group_id.as_deref(), Some("group_a"));
    assert_eq!(common.subcircuit_id.as_deref(), Some("subcircuit_1"));
}

#[test]
fn test_unknown_fields_are_ignored() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["soldermask_margin"] = json!(0.1);

    let hole = parse_plated_hole(&input, &ids).unwrap();
    let output = serde_json::to_value(&hole).unwrap();
    assert!(output.get("soldermask_margin").is_none());
}

#[test]
fn test_layer_order_is_preserved() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["layers"] = json!(["bottom", { "name": "inner2" }, "top"]);

    let hole = parse_plated_hole(&input, &ids).unwrap();
    assert_eq!(
        hole.layers(),
        &[LayerRef::Bottom, LayerRef::Inner2, LayerRef::Top]
    );
}

// =============================================================================
// Idempotence and identifiers
// =============================================================================

#[test]
fn test_canonical_records_are_idempotent() {
    let ids = CounterIdGenerator::new();
    for input in [
        minimal_circle(),
        minimal_oval("oval"),
        minimal_circular_hole_with_rect_pad(),
        minimal_pill_hole_with_rect_pad(),
    ] {
        let first = parse_plated_hole(&input, &ids).unwrap();
        let canonical = serde_json::to_value(&first).unwrap();

        let second = parse_plated_hole(&canonical, &ids).unwrap();
        assert_eq!(first, second);
        assert_eq!(serde_json::to_value(&second).unwrap(), canonical);

        let decoded: PcbPlatedHole = serde_json::from_value(canonical).unwrap();
        assert_eq!(decoded, first);
    }
}

#[test]
fn test_missing_ids_never_collide() {
    let ids = CounterIdGenerator::new();
    let mut other = minimal_circle();
    other["x"] = json!(5);

    let a = parse_plated_hole(&minimal_circle(), &ids).unwrap();
    let b = parse_plated_hole(&other, &ids).unwrap();
    assert!(a.id().starts_with("pcb_plated_hole_"));
    assert!(b.id().starts_with("pcb_plated_hole_"));
    assert_ne!(a.id(), b.id());
}

#[test]
fn test_empty_id_is_generated() {
    let ids = CounterIdGenerator::starting_at(10);
    let mut input = minimal_circle();
    input["pcb_plated_hole_id"] = json!("");

    let hole = parse_plated_hole(&input, &ids).unwrap();
    assert_eq!(hole.id(), "pcb_plated_hole_10");
}

#[test]
fn test_non_string_id_is_wrong_type() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["pcb_plated_hole_id"] = json!(42);

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::WrongType { .. }));
    assert_eq!(err.field(), Some("pcb_plated_hole_id"));
}

#[test]
fn test_authored_canonical_records_validate_unchanged() {
    let ids = CounterIdGenerator::starting_at(100);
    for mut input in [
        minimal_circle(),
        minimal_oval("pill"),
        minimal_circular_hole_with_rect_pad(),
        minimal_pill_hole_with_rect_pad(),
    ] {
        input["pcb_plated_hole_id"] = json!("h1");

        let validated = parse_plated_hole(&input, &ids).unwrap();
        let decoded: PcbPlatedHole = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(validated, decoded);
        assert_eq!(validated.id(), "h1");

        // Distances come back as floats, so integers compare numerically.
        let output = serde_json::to_value(&validated).unwrap();
        let input = input.as_object().unwrap();
        let output = output.as_object().unwrap();
        assert_eq!(input.len(), output.len());
        for (key, authored) in input {
            let emitted = &output[key];
            match authored.as_f64() {
                Some(number) => assert_eq!(emitted.as_f64(), Some(number), "{key}"),
                None => assert_eq!(emitted, authored, "{key}"),
            }
        }
    }
}

#[test]
fn test_canonical_decode_rejects_empty_id() {
    let mut input = minimal_circle();
    input["pcb_plated_hole_id"] = json!("");
    assert!(serde_json::from_value::<PcbPlatedHole>(input).is_err());

    let mut input = minimal_circle();
    input["pcb_plated_hole_id"] = json!("h1");
    assert!(serde_json::from_value::<PcbPlatedHole>(input).is_ok());
}

// =============================================================================
// Distance normalisation
// =============================================================================

#[test]
fn test_unit_string_matches_number() {
    let ids = CounterIdGenerator::new();
    let mut with_unit = minimal_circle();
    with_unit["x"] = json!("1mm");
    let mut with_number = minimal_circle();
    with_number["x"] = json!(1);

    let a = parse_plated_hole(&with_unit, &ids).unwrap();
    let b = parse_plated_hole(&with_number, &ids).unwrap();
    assert_close(a.position().0, b.position().0);
    assert_close(a.position().0, 1.0);
}

#[test]
fn test_numbers_and_mm_strings_agree() {
    let ids = CounterIdGenerator::new();
    for d in [0.0, 0.25, 1.27, -3.5, 100.0] {
        let mut as_number = minimal_circle();
        as_number["y"] = json!(d);
        let mut as_string = minimal_circle();
        as_string["y"] = json!(format!("{d}mm"));

        let a = parse_plated_hole(&as_number, &ids).unwrap();
        let b = parse_plated_hole(&as_string, &ids).unwrap();
        assert_close(a.position().1, b.position().1);
    }
}

#[test]
fn test_dimension_fields_accept_units() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circular_hole_with_rect_pad();
    input["hole_diameter"] = json!("40mil");
    input["rect_pad_width"] = json!("0.1in");
    input["rect_pad_height"] = json!("1800um");

    let hole = parse_plated_hole(&input, &ids).unwrap();
    let PcbPlatedHole::CircularHoleWithRectPad(pad) = hole else {
        panic!("expected circular hole with rect pad");
    };
    assert_close(pad.hole_diameter, 1.016);
    assert_close(pad.rect_pad_width, 2.54);
    assert_close(pad.rect_pad_height, 1.8);
}

#[test]
fn test_bad_distance_string_names_field() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_pill_hole_with_rect_pad();
    input["rect_pad_height"] = json!("1.2 cubits");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDistanceFormat { .. }));
    assert_eq!(err.field(), Some("rect_pad_height"));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_not_a_plated_hole() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["type"] = json!("pcb_hole");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::NotAPlatedHole { .. }));
}

#[test]
fn test_missing_type_is_not_a_plated_hole() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input.as_object_mut().unwrap().remove("type");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::NotAPlatedHole { .. }));
}

#[test]
fn test_unknown_shape() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["shape"] = json!("hexagon");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert_eq!(
        err,
        SchemaError::UnknownShape {
            shape: "hexagon".to_string()
        }
    );
}

#[test]
fn test_shape_is_case_sensitive() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["shape"] = json!("Circle");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownShape { .. }));
}

#[test]
fn test_circle_missing_hole_diameter() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input.as_object_mut().unwrap().remove("hole_diameter");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            field: "hole_diameter".to_string()
        }
    );
}

#[test]
fn test_pill_hole_with_circle_hole_shape_is_mismatch() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_pill_hole_with_rect_pad();
    input["hole_shape"] = json!("circle");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    match err {
        SchemaError::VariantMismatch {
            shape,
            field,
            expected,
            ..
        } => {
            assert_eq!(shape, "pill_hole_with_rect_pad");
            assert_eq!(field, "hole_shape");
            assert_eq!(expected, "pill");
        }
        other => panic!("expected variant mismatch, got {other:?}"),
    }
}

#[test]
fn test_wrong_pad_shape_is_mismatch() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circular_hole_with_rect_pad();
    input["pad_shape"] = json!("circle");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::VariantMismatch { .. }));
    assert_eq!(err.field(), Some("pad_shape"));
}

#[test]
fn test_hybrid_without_secondary_tags_is_rejected() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circular_hole_with_rect_pad();
    let map = input.as_object_mut().unwrap();
    map.remove("hole_shape");
    map.remove("pad_shape");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            field: "hole_shape".to_string()
        }
    );
}

#[test]
fn test_fields_of_another_variant_do_not_match() {
    let ids = CounterIdGenerator::new();
    // Circle discriminant with oval geometry
    let mut input = minimal_oval("oval");
    input["shape"] = json!("circle");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert_eq!(
        err,
        SchemaError::MissingField {
            field: "outer_diameter".to_string()
        }
    );
}

#[test]
fn test_wrong_type_for_geometry() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["outer_diameter"] = json!([2]);

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::WrongType { .. }));
    assert_eq!(err.field(), Some("outer_diameter"));
}

#[test]
fn test_layers_must_be_array() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["layers"] = json!("top");

    let err = parse_plated_hole(&input, &ids).unwrap_err();
    assert!(matches!(err, SchemaError::WrongType { .. }));
    assert_eq!(err.field(), Some("layers"));
}

#[test]
fn test_null_optional_field_is_rejected_on_both_paths() {
    let ids = CounterIdGenerator::new();
    for field in ["pcb_group_id", "pcb_component_id", "port_hints"] {
        let mut input = minimal_circle();
        input["pcb_plated_hole_id"] = json!("h1");
        input[field] = Value::Null;

        let err = parse_plated_hole(&input, &ids).unwrap_err();
        assert!(matches!(err, SchemaError::WrongType { .. }), "{field}: {err:?}");
        assert_eq!(err.field(), Some(field));

        assert!(serde_json::from_value::<PcbPlatedHole>(input).is_err(), "{field}");
    }
}

#[test]
fn test_errors_are_deterministic() {
    let ids = CounterIdGenerator::new();
    let mut input = minimal_circle();
    input["shape"] = json!("hexagon");

    let first = parse_plated_hole(&input, &ids).unwrap_err();
    let second = parse_plated_hole(&input, &ids).unwrap_err();
    assert_eq!(first, second);
}
