mod common;

use common::{fails, fails_with};
use im_expect::{expect, Value};

#[test]
fn new_collections_are_empty() {
    common::init_tracing();
    expect(Value::list::<[i32; 0], i32>([])).to().be().empty();
    expect(Value::map::<[(&str, i32); 0], &str, i32>([]))
        .to()
        .be()
        .empty();
    expect(Value::set::<[i32; 0], i32>([])).to().be().empty();
    expect(Value::stack::<[i32; 0], i32>([])).to().be().empty();
}

#[test]
fn populated_collections_are_not_empty() {
    expect(Value::list([1, 2, 3])).to().not().be().empty();
    expect(Value::map([("foo", "bar")])).to().not().be().empty();
}

#[test]
fn empty_failure_reports_the_size() {
    fails_with("to be empty but got size 3", || {
        expect(Value::list([1, 2, 3])).to().be().empty();
    });
    fails_with("to not be empty", || {
        expect(Value::set::<[i32; 0], i32>([])).to().not().be().empty();
    });
}

#[test]
fn equal_uses_structural_equality() {
    expect(Value::list([1, 2, 3])).to().equal(Value::list([1, 2, 3]));
    expect(Value::map([("a", 1)])).to().equal(Value::map([("a", 1)]));
    expect(Value::set(["x", "y"])).to().equal(Value::set(["y", "x"]));
    expect(Value::stack([1])).to().equal(Value::stack([1]));

    expect(Value::list([1, 2, 3])).to().not().equal(Value::list([3, 2, 1]));
    fails_with("to equal", || {
        expect(Value::list([1])).to().equal(Value::list([2]));
    });
}

#[test]
fn equal_sees_through_construction_history() {
    let mut grown = im::vector![Value::from(1), Value::from(2)];
    grown.push_back(Value::from(3));
    expect(Value::List(grown)).to().equal(Value::list([1, 2, 3]));
}

#[test]
fn equal_recurses_through_nested_collections() {
    let a = Value::map([("inner", Value::list([Value::map([("x", 1)])]))]);
    let b = Value::map([("inner", Value::list([Value::map([("x", 1)])]))]);
    expect(a.clone()).to().equal(b);
    expect(a).to().not().equal(Value::map([(
        "inner",
        Value::list([Value::map([("x", 2)])]),
    )]));
}

#[test]
fn equal_aliases_agree() {
    let subject = || Value::list([1, 2]);
    let expected = || Value::list([1, 2]);
    expect(subject()).to().equals(expected());
    expect(subject()).to().eq(expected());
    expect(subject()).to().eql(expected());
    expect(subject()).to().eqls(expected());
    expect(subject()).to().deep().equal(expected());
}

#[test]
fn collections_of_different_shapes_never_equal() {
    expect(Value::list([1, 2])).to().not().equal(Value::stack([1, 2]));
    expect(Value::set([1])).to().not().equal(Value::list([1]));
}

#[test]
fn include_finds_structurally_equal_elements() {
    expect(Value::list([1, 2, 3])).to().include(2);
    expect(Value::list([1, 2, 3])).to().not().include(4);
    expect(Value::set(["a", "b"])).to().include("a");
    expect(Value::stack(["top", "bottom"])).to().include("bottom");
    expect(Value::list([Value::map([("tea", "chai")])]))
        .to()
        .include(Value::map([("tea", "chai")]));

    fails_with("to include 4", || {
        expect(Value::list([1, 2, 3])).to().include(4);
    });
}

#[test]
fn include_on_maps_accepts_values_and_sub_collections() {
    let subject = Value::map([("foo", "bar"), ("hello", "world")]);
    expect(subject.clone()).to().include("world");
    expect(subject.clone()).to().include(Value::map([("foo", "bar")]));
    expect(subject.clone())
        .to()
        .not()
        .include(Value::map([("foo", "world")]));
    expect(subject).to().contains(Value::map([("hello", "world")]));
}

#[test]
fn size_of_checks_the_exact_size() {
    expect(Value::list([1, 2, 3])).to().have().size_of(3);
    expect(Value::map([("a", 1)])).to().have().size_of(1);
    expect(Value::set([1, 2])).to().have().size_of(2);
    expect(Value::stack([1])).to().have().size_of(1);
    expect(Value::list([1])).to().not().have().size_of(2);

    fails_with("to have size 4 but got 3", || {
        expect(Value::list([1, 2, 3])).to().have().size_of(4);
    });
}

#[test]
fn size_of_rejects_non_collections() {
    fails_with("to be a collection", || {
        expect("foo").to().have().size_of(3);
    });
}

#[test]
fn negated_equality_fails_on_equal_values() {
    fails(|| {
        expect(Value::list([1, 2])).to().not().equal(Value::list([1, 2]));
    });
}
