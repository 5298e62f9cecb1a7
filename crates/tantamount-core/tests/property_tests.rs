//! Property-based tests for the value model and the validation pipeline
//!
//! Random acyclic value graphs are generated with proptest and pushed through
//! deep cloning, rendering, and full validations to check the engine's
//! reflexivity guarantees.

mod common;

use common::{failure_messages, run_validation};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use tantamount_core::Value;

// =============================================================================
// Value graph strategies
// =============================================================================

/// Generate scalar leaves covering every non-composite kind
fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::unit()),
        any::<bool>().prop_map(Value::bool),
        any::<i64>().prop_map(Value::int),
        any::<f64>().prop_map(Value::float),
        "[ -~]{0,12}".prop_map(|text| Value::text(text)),
    ]
}

/// Generate acyclic graphs up to four composite levels deep
fn value_graph() -> BoxedStrategy<Value> {
    scalar_value()
        .prop_recursive(4, 48, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::seq),
                prop::collection::btree_map("[a-z]{1,5}", inner.clone(), 0..4)
                    .prop_map(|entries| Value::map(entries)),
                (
                    "[A-Z][a-z]{1,6}",
                    prop::collection::btree_map("[A-Z][a-z]{1,6}", inner, 0..4),
                )
                    .prop_map(|(type_name, fields)| {
                        Value::record(type_name, fields.into_iter().collect::<Vec<_>>())
                    }),
            ]
        })
        .boxed()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // -------------------------------------------------------------------------
    // Validation properties
    // -------------------------------------------------------------------------

    /// A graph validated against itself never raises a failure
    #[test]
    fn test_a_value_is_equivalent_to_itself(value in value_graph()) {
        let context = run_validation(value.clone(), value);
        prop_assert!(failure_messages(&context).is_empty());
    }

    /// A deep clone aliases none of its source yet validates clean against it
    #[test]
    fn test_a_deep_clone_is_equivalent_to_its_source(value in value_graph()) {
        let copy = value.deep_clone();
        prop_assert!(!copy.ptr_eq(&value));

        let context = run_validation(copy, value);
        let messages = failure_messages(&context);
        prop_assert!(messages.is_empty(), "unexpected failures: {:?}", messages);
    }

    /// Scalar pairs validate clean exactly when they are structurally equal
    #[test]
    fn test_scalar_validation_agrees_with_structural_equality(
        subject in scalar_value(),
        expectation in scalar_value(),
    ) {
        let clean = subject.structurally_equal(&expectation);
        let context = run_validation(subject, expectation);
        prop_assert_eq!(failure_messages(&context).is_empty(), clean);
    }

    // -------------------------------------------------------------------------
    // Model properties
    // -------------------------------------------------------------------------

    /// Deep cloning preserves structural equality in both directions
    #[test]
    fn test_a_deep_clone_is_structurally_equal(value in value_graph()) {
        let copy = value.deep_clone();
        prop_assert!(copy.structurally_equal(&value));
        prop_assert!(value.structurally_equal(&copy));
    }

    /// Rendering never panics and agrees between a graph and its clone
    #[test]
    fn test_rendering_is_stable_across_clones(value in value_graph()) {
        let rendered = format!("{}", value);
        prop_assert!(!rendered.is_empty());
        prop_assert_eq!(rendered, format!("{}", value.deep_clone()));
    }
}
