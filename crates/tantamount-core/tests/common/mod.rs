use std::sync::Arc;

use tantamount_core::{
    Comparands, EquivalencyOptions, EquivalencyValidationContext, EquivalencyValidator, Value,
};

/// Run a full validation with the given options and return its context
#[allow(dead_code)]
pub fn run_validation_with(
    subject: Value,
    expectation: Value,
    options: EquivalencyOptions,
) -> EquivalencyValidationContext {
    let mut context = EquivalencyValidationContext::new(Arc::new(options));
    let comparands = Comparands::rooted(subject, expectation);
    EquivalencyValidator::new()
        .assert_equality(&comparands, &mut context)
        .unwrap();
    context
}

/// Run a full validation with default options and return its context
#[allow(dead_code)]
pub fn run_validation(subject: Value, expectation: Value) -> EquivalencyValidationContext {
    run_validation_with(subject, expectation, EquivalencyOptions::new())
}

/// Messages of every failure recorded on the context, in raised order
#[allow(dead_code)]
pub fn failure_messages(context: &EquivalencyValidationContext) -> Vec<String> {
    context
        .scope()
        .failures()
        .iter()
        .map(|failure| failure.message.clone())
        .collect()
}

/// Paths of every failure recorded on the context, in raised order
#[allow(dead_code)]
pub fn failure_paths(context: &EquivalencyValidationContext) -> Vec<String> {
    context
        .scope()
        .failures()
        .iter()
        .map(|failure| failure.path.clone())
        .collect()
}

/// An order record with a customer, a total, and line items
#[allow(dead_code)]
pub fn order(customer: &str, total: f64, items: Vec<Value>) -> Value {
    Value::record(
        "Order",
        vec![
            ("Customer", Value::text(customer)),
            ("Total", Value::float(total)),
            ("Items", Value::seq(items)),
        ],
    )
}

/// A sequence nested inside itself the given number of levels
#[allow(dead_code)]
pub fn nested_seq(levels: usize, leaf: Value) -> Value {
    let mut value = leaf;
    for _ in 0..levels {
        value = Value::seq(vec![value]);
    }
    value
}

/// A node record whose Next member points back at the record itself
#[allow(dead_code)]
pub fn self_linked_node(label: &str) -> Value {
    let node = Value::record(
        "Node",
        vec![("Label", Value::text(label)), ("Next", Value::unit())],
    );
    node.set_field("Next", node.clone());
    node
}
