mod common;

use std::sync::Arc;

use common::{
    failure_messages, failure_paths, nested_seq, order, run_validation, run_validation_with,
    self_linked_node,
};
use tantamount_core::options::ApproxFloatComparer;
use tantamount_core::{
    Comparands, EquivalencyOptions, EquivalencyValidationContext, EquivalencyValidator, Value,
};
use tantamount_core_types::TypeToken;

// ===== EQUIVALENT GRAPH TESTS =====

#[test]
fn test_a_value_is_equivalent_to_itself() {
    let value = order("Ada", 12.5, vec![Value::int(1), Value::int(2)]);
    let context = run_validation(value.clone(), value);
    assert!(!context.scope().has_failures());
}

#[test]
fn test_structurally_equal_graphs_are_equivalent() {
    let subject = order("Ada", 12.5, vec![Value::int(1), Value::int(2)]);
    let expectation = order("Ada", 12.5, vec![Value::int(1), Value::int(2)]);

    let context = run_validation(subject, expectation);
    assert!(!context.scope().has_failures());
}

#[test]
fn test_a_deep_clone_is_equivalent_to_its_source() {
    let original = order("Ada", 12.5, vec![order("Bea", 1.0, vec![])]);
    let context = run_validation(original.deep_clone(), original);
    assert!(!context.scope().has_failures());
}

#[test]
fn test_extra_subject_members_do_not_fail() {
    let subject = Value::record(
        "Person",
        vec![("Name", Value::text("Ada")), ("Age", Value::int(36))],
    );
    let expectation = Value::record("Person", vec![("Name", Value::text("Ada"))]);

    let context = run_validation(subject, expectation);
    assert!(!context.scope().has_failures());
}

// ===== MISMATCH REPORTING TESTS =====

#[test]
fn test_member_mismatch_reports_path_and_both_values() {
    let subject = Value::record("X", vec![("Value", Value::int(1))]);
    let expectation = Value::record("Y", vec![("Value", Value::int(2))]);

    let context = run_validation(subject, expectation);

    let failures = context.scope().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, "root.Value");
    assert_eq!(
        failures[0].message,
        "Expected root.Value to be 2, but found 1."
    );
}

#[test]
fn test_every_mismatch_in_the_graph_is_collected() {
    let subject = order("Bob", 10.0, vec![Value::int(1)]);
    let expectation = order("Ada", 12.5, vec![Value::int(2)]);

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_paths(&context),
        vec!["root.Customer", "root.Total", "root.Items[0]"]
    );
    assert_eq!(
        failure_messages(&context)[0],
        "Expected root.Customer to be \"Ada\", but found \"Bob\"."
    );
}

#[test]
fn test_sequence_length_mismatch_reports_counts() {
    let subject = Value::seq(vec![Value::int(1), Value::int(2)]);
    let expectation = Value::seq(vec![Value::int(1), Value::int(2), Value::int(3)]);

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_messages(&context),
        vec!["Expected root to contain 3 item(s), but found 2."]
    );
}

#[test]
fn test_non_sequence_subject_against_sequence_expectation() {
    let context = run_validation(Value::int(3), Value::seq(vec![Value::int(3)]));
    assert_eq!(
        failure_messages(&context),
        vec!["Expected root to be a sequence, but found 3."]
    );
}

#[test]
fn test_map_value_mismatch_is_attributed_to_the_key() {
    let subject = Value::map(vec![
        ("a".to_string(), Value::int(1)),
        ("b".to_string(), Value::int(2)),
    ]);
    let expectation = Value::map(vec![
        ("a".to_string(), Value::int(1)),
        ("b".to_string(), Value::int(3)),
    ]);

    let context = run_validation(subject, expectation);

    assert_eq!(failure_paths(&context), vec!["root[\"b\"]"]);
}

#[test]
fn test_missing_and_unexpected_keys_are_both_reported() {
    let subject = Value::map(vec![
        ("a".to_string(), Value::int(1)),
        ("c".to_string(), Value::int(9)),
    ]);
    let expectation = Value::map(vec![
        ("a".to_string(), Value::int(1)),
        ("b".to_string(), Value::int(2)),
    ]);

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_messages(&context),
        vec![
            "Expected root to contain key \"b\", but it was missing.",
            "Did not expect root to contain key \"c\".",
        ]
    );
}

#[test]
fn test_present_value_where_nothing_was_expected() {
    let subject = Value::record("Node", vec![("Tag", Value::text("x"))]);
    let expectation = Value::record("Node", vec![("Tag", Value::unit())]);

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_messages(&context),
        vec!["Expected root.Tag to be <unit>, but found \"x\"."]
    );
}

#[test]
fn test_absent_value_where_one_was_expected() {
    let subject = Value::record("Node", vec![("Tag", Value::unit())]);
    let expectation = Value::record("Node", vec![("Tag", Value::int(5))]);

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_messages(&context),
        vec!["Expected root.Tag to be 5, but found <unit>."]
    );
}

// ===== CUSTOM COMPARER TESTS =====

#[test]
fn test_float_comparer_within_tolerance_passes() {
    let subject = Value::record("Reading", vec![("Value", Value::float(1.0 / 3.0))]);
    let expectation = Value::record("Reading", vec![("Value", Value::float(0.33))]);
    let options = EquivalencyOptions::new()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));

    let context = run_validation_with(subject, expectation, options);
    assert!(!context.scope().has_failures());
}

#[test]
fn test_float_mismatch_without_a_comparer_names_the_expectation() {
    let subject = Value::record("Reading", vec![("Value", Value::float(1.0 / 3.0))]);
    let expectation = Value::record("Reading", vec![("Value", Value::float(0.33))]);

    let context = run_validation(subject, expectation);

    let failures = context.scope().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, "root.Value");
    assert!(failures[0].message.contains("0.33"));
}

#[test]
fn test_comparer_rejects_a_subject_of_the_wrong_type() {
    let subject = Value::record("Reading", vec![("Value", Value::text("n/a"))]);
    let expectation = Value::record("Reading", vec![("Value", Value::float(0.33))]);
    let options = EquivalencyOptions::new()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));

    let context = run_validation_with(subject, expectation, options);

    assert_eq!(
        failure_messages(&context),
        vec!["Expected root.Value to be of type float, but found text."]
    );
}

#[test]
fn test_comparer_failure_cites_the_comparer() {
    let subject = Value::record("Reading", vec![("Value", Value::float(0.4))]);
    let expectation = Value::record("Reading", vec![("Value", Value::float(0.33))]);
    let options = EquivalencyOptions::new()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));

    let context = run_validation_with(subject, expectation, options);

    let message = &context.scope().failures()[0].message;
    assert!(message.contains("a float comparer with tolerance 0.01"));
    assert!(message.contains("0.4 was not"));
}

// ===== DEPTH GUARD TESTS =====

#[test]
fn test_nesting_to_the_depth_bound_passes() {
    let context = run_validation(nested_seq(10, Value::int(1)), nested_seq(10, Value::int(1)));
    assert!(!context.scope().has_failures());
}

#[test]
fn test_nesting_past_the_depth_bound_reports_exactly_one_failure() {
    let context = run_validation(nested_seq(11, Value::int(1)), nested_seq(11, Value::int(2)));

    assert_eq!(
        failure_messages(&context),
        vec!["The maximum recursion depth of 10 was reached."]
    );
}

#[test]
fn test_depth_failures_leave_sibling_branches_alone() {
    let subject = Value::record(
        "Holder",
        vec![
            ("Deep", nested_seq(12, Value::int(1))),
            ("Flag", Value::bool(false)),
        ],
    );
    let expectation = Value::record(
        "Holder",
        vec![
            ("Deep", nested_seq(12, Value::int(1))),
            ("Flag", Value::bool(true)),
        ],
    );

    let context = run_validation(subject, expectation);

    assert_eq!(
        failure_messages(&context),
        vec![
            "The maximum recursion depth of 10 was reached.",
            "Expected root.Flag to be true, but found false.",
        ]
    );
}

#[test]
fn test_allowing_infinite_recursion_descends_to_the_leaves() {
    let context = run_validation_with(
        nested_seq(15, Value::int(1)),
        nested_seq(15, Value::int(2)),
        EquivalencyOptions::new().allowing_infinite_recursion(),
    );

    let failures = context.scope().failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("to be 2"));
}

// ===== CYCLE TESTS =====

#[test]
fn test_cycle_back_to_the_same_reference_passes() {
    let expectation = self_linked_node("hub");
    let subject = Value::record(
        "Node",
        vec![
            ("Label", Value::text("hub")),
            ("Next", expectation.clone()),
        ],
    );

    let context = run_validation(subject, expectation);
    assert!(!context.scope().has_failures());
}

#[test]
fn test_mirrored_cycles_terminate_and_fail_reference_identity() {
    let subject = self_linked_node("hub");
    let expectation = self_linked_node("hub");

    let context = run_validation(subject, expectation);

    let failures = context.scope().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path, "root.Next");
    assert!(failures[0].message.contains("to refer to"));
}

#[test]
fn test_expectation_shared_across_siblings_is_not_a_cycle() {
    let shared = Value::record("Point", vec![("X", Value::int(1))]);
    let expectation = Value::seq(vec![shared.clone(), shared]);
    let subject = Value::seq(vec![
        Value::record("Point", vec![("X", Value::int(1))]),
        Value::record("Point", vec![("X", Value::int(1))]),
    ]);

    let context = run_validation(subject, expectation);
    assert!(!context.scope().has_failures());
}

// ===== REASON AND REPORT TESTS =====

#[test]
fn test_reason_is_woven_into_every_failure() {
    let mut context = EquivalencyValidationContext::new(Arc::new(EquivalencyOptions::new()))
        .with_reason("the ledger was rebuilt");
    let comparands = Comparands::rooted(
        Value::record("X", vec![("Value", Value::int(1))]),
        Value::record("X", vec![("Value", Value::int(2))]),
    );
    EquivalencyValidator::new()
        .assert_equality(&comparands, &mut context)
        .unwrap();

    assert_eq!(
        context.scope().failures()[0].message,
        "Expected root.Value to be 2 because the ledger was rebuilt, but found 1."
    );
}

#[test]
fn test_configuration_reportable_summarizes_the_options() {
    let options = EquivalencyOptions::new()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));
    let context = run_validation_with(Value::int(1), Value::int(1), options);

    let reportables = context.scope().reportables();
    assert_eq!(reportables[0].0, "configuration");
    assert!(reportables[0].1.contains("custom comparers: 1"));
}

#[test]
fn test_trace_reportable_shows_the_visit_tree() {
    let mut context =
        EquivalencyValidationContext::new(Arc::new(EquivalencyOptions::new())).with_tracing();
    let comparands = Comparands::rooted(
        order("Ada", 12.5, vec![Value::int(1)]),
        order("Ada", 12.5, vec![Value::int(1)]),
    );
    EquivalencyValidator::new()
        .assert_equality(&comparands, &mut context)
        .unwrap();

    let trace = context
        .scope()
        .reportables()
        .iter()
        .find(|(key, _)| key == "trace")
        .map(|(_, value)| value.clone())
        .unwrap();

    assert!(trace.contains("Visiting root\n"));
    assert!(trace.contains("  Visiting root.Customer\n"));
    assert!(trace.contains("    Visiting root.Items[0]\n"));
    assert!(trace.contains("RecordEquivalencyStep owned root\n"));
}

#[test]
fn test_report_serializes_every_failure_to_json() {
    let subject = Value::record("X", vec![("Value", Value::int(1))]);
    let expectation = Value::record("X", vec![("Value", Value::int(2))]);
    let context = run_validation(subject, expectation);

    let json = serde_json::to_value(context.scope().report()).unwrap();

    assert_eq!(json["failures"][0]["path"], "root.Value");
    assert_eq!(
        json["failures"][0]["message"],
        "Expected root.Value to be 2, but found 1."
    );
    assert_eq!(json["reportables"][0][0], "configuration");
}

// ===== TYPING MODE TESTS =====

#[test]
fn test_declared_typing_drives_comparer_dispatch() {
    let options = EquivalencyOptions::new()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));
    let mut context = EquivalencyValidationContext::new(Arc::new(options));
    let comparands = Comparands::new(Value::float(0.334), Value::float(0.33), TypeToken::Int);

    EquivalencyValidator::new()
        .assert_equality(&comparands, &mut context)
        .unwrap();

    // The declared type never reaches the float comparer, so plain
    // structural equality decides the pair.
    assert!(context.scope().has_failures());
}

#[test]
fn test_runtime_typing_dispatches_on_the_actual_values() {
    let options = EquivalencyOptions::new()
        .respecting_runtime_types()
        .using_comparer(TypeToken::Float, Arc::new(ApproxFloatComparer::new(0.01)));
    let mut context = EquivalencyValidationContext::new(Arc::new(options));
    let comparands = Comparands::new(Value::float(0.334), Value::float(0.33), TypeToken::Int);

    EquivalencyValidator::new()
        .assert_equality(&comparands, &mut context)
        .unwrap();

    assert!(!context.scope().has_failures());
}
