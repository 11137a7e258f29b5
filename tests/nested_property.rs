mod common;

use common::{fails, fails_with};
use im_expect::{expect, Value};
use serde_json::json;

fn nested_map() -> Value {
    Value::map([
        ("green", Value::map([("tea", Value::from("matcha"))])),
        (
            "teas",
            Value::list([
                Value::from("chai"),
                Value::from("matcha"),
                Value::map([("tea", "konacha")]),
            ]),
        ),
    ])
}

fn nested_list() -> Value {
    Value::list([
        Value::list(["chai", "matcha", "konacha"]),
        Value::list([
            Value::map([("tea", "chai")]),
            Value::map([("tea", "matcha")]),
            Value::map([("tea", "konacha")]),
        ]),
    ])
}

#[test]
fn flat_property_looks_up_a_literal_key() {
    let map = Value::map([("foo", "bar")]);
    expect(map.clone()).to().have().property("foo");
    expect(map.clone()).to().have().property_eq("foo", "bar");
    expect(map).to().not().have().property("baz");
}

#[test]
fn flat_property_does_not_parse_delimiters() {
    let css = Value::map([(".link[target]", 42)]);
    expect(css.clone()).to().have().property_eq(".link[target]", 42);
    expect(css).to().not().have().property("link");
}

#[test]
fn nested_property_parses_dot_and_bracket_paths() {
    expect(nested_map()).to().have().nested().property("green.tea");
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq("green.tea", "matcha");
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq("teas[1]", "matcha");
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq("teas[2].tea", "konacha");
}

#[test]
fn nested_property_accepts_materialized_paths() {
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq(json!(["green", "tea"]), "matcha");
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq(json!(["teas", 2, "tea"]), "konacha");
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq(Value::list([Value::from("teas"), Value::from(1usize)]), "matcha");
}

#[test]
fn nested_lists_traverse_by_index() {
    expect(nested_list())
        .to()
        .have()
        .nested()
        .property_eq("[0][1]", "matcha");
    expect(nested_list())
        .to()
        .have()
        .nested()
        .property_eq("[1][2].tea", "konacha");
    expect(nested_list())
        .to()
        .have()
        .nested()
        .property_eq(json!([1, 2, "tea"]), "konacha");
}

#[test]
fn escaped_delimiters_address_literal_keys() {
    let css = Value::map([(".link", Value::map([("[target]", 42)]))]);
    expect(css)
        .to()
        .have()
        .nested()
        .property_eq("\\.link.\\[target\\]", 42);
}

#[test]
fn missing_intermediate_steps_fail_the_presence_check() {
    fails_with("to have nested property", || {
        expect(nested_map()).to().have().nested().property("teas[9].tea");
    });
    fails(|| {
        expect(nested_map())
            .to()
            .have()
            .nested()
            .property_eq("teas[9].tea", "konacha");
    });
}

#[test]
fn value_mismatch_reports_expected_and_actual() {
    fails_with("of \"sencha\", but got \"matcha\"", || {
        expect(nested_map())
            .to()
            .have()
            .nested()
            .property_eq("green.tea", "sencha");
    });
}

#[test]
fn negated_property_with_value_passes_when_the_property_is_absent() {
    expect(nested_map())
        .to()
        .not()
        .have()
        .nested()
        .property_eq("teas[9].tea", "konacha");
    expect(nested_map())
        .to()
        .not()
        .have()
        .nested()
        .property_eq("green.tea", "sencha");
    fails(|| {
        expect(nested_map())
            .to()
            .not()
            .have()
            .nested()
            .property_eq("green.tea", "matcha");
    });
}

#[test]
fn property_rebinds_the_chain_subject() {
    expect(nested_map())
        .to()
        .have()
        .property("green")
        .that()
        .equals(Value::map([("tea", "matcha")]));
    expect(nested_map())
        .to()
        .have()
        .property("teas")
        .with()
        .size().above(2);

    let chain = expect(nested_map()).to().have().nested().property("teas[2]");
    assert_eq!(chain.subject(), &Value::map([("tea", "konacha")]));
}

#[test]
fn expected_collection_values_compare_structurally() {
    expect(nested_map())
        .to()
        .have()
        .nested()
        .property_eq("teas[2]", Value::map([("tea", "konacha")]));
}

#[test]
fn empty_string_paths_are_usage_errors() {
    fails_with("property path required", || {
        expect(nested_map()).to().have().nested().property("");
    });
}

#[test]
fn plain_values_keep_the_baseline_property_behavior() {
    expect(json!({"a": {"b": [1, 2]}}))
        .to()
        .have()
        .nested()
        .property_eq("a.b[1]", 2);
    expect(json!({"foo": "bar"})).to().have().property_eq("foo", "bar");
    expect(json!({"foo": "bar"})).to().not().have().property("baz");
}
