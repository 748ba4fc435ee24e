// Behavioral tests for classification, composition and ordered catching

mod common;

use std::cell::Cell;
use std::collections::BTreeSet;

use erxpected::prelude::*;
use erxpected::{identity_of, sequence};

declare_error_kind! {
    pub struct Mid: RuntimeError;
    pub struct Leaf: Mid;
    pub struct Sibling: RuntimeError;
}

#[test]
fn identity_is_stable_and_distinct() {
    common::init_test_logging();

    assert_eq!(identity_of::<Leaf>(), identity_of::<Leaf>());
    assert_ne!(identity_of::<Leaf>(), identity_of::<Mid>());
    assert_ne!(identity_of::<Mid>(), identity_of::<RuntimeError>());
    assert_ne!(identity_of::<Sibling>(), identity_of::<Mid>());
}

#[test]
fn ancestor_closure_for_three_levels() {
    let root = identity_of::<RuntimeError>();
    let mid = identity_of::<Mid>();
    let leaf = identity_of::<Leaf>();

    assert_eq!(Leaf::base_ids(), BTreeSet::from([root, mid, leaf]));
    assert_eq!(Mid::base_ids(), BTreeSet::from([root, mid]));
    assert_eq!(RuntimeError::base_ids(), BTreeSet::from([root]));
}

#[test]
fn exact_versus_base_catch() {
    let outcome: Outcome<i32> = Outcome::failure(Leaf::new("deep"));

    assert!(outcome.get_exact::<Leaf>().is_some());
    assert!(outcome.get_exact::<Mid>().is_none());
    assert!(outcome.catch_as::<Mid>().is_some());
    assert!(outcome.catch_as::<RuntimeError>().is_some());
    assert!(outcome.catch_as::<Sibling>().is_none());
}

#[test]
fn copies_survive_the_original() {
    let mut original: Outcome<i32> = Outcome::failure(Leaf::new("kept"));
    let copy = original.clone();

    original = Outcome::success(1);
    assert!(original.has_value());
    drop(original);

    assert_eq!(copy.what().as_deref(), Some("Leaf: kept"));
    assert_eq!(copy.catch_as::<Mid>().map(|mid| mid.what()), Some("Leaf: kept".to_string()));
}

#[test]
fn short_circuit_skips_later_operations() {
    common::init_test_logging();

    let h_calls = Cell::new(0);
    let g = || Outcome::<i32>::failure(Leaf::new("g failed"));
    let h = || {
        h_calls.set(h_calls.get() + 1);
        Outcome::success(2)
    };

    let f = fallible(|| {
        let a = g().into_result()?;
        let b = h().into_result()?;
        Ok(a + b)
    });

    assert_eq!(h_calls.get(), 0);
    assert!(f.has_error());
    assert_eq!(f.error().map(|e| e.base_ids().clone()), Some(Leaf::base_ids()));
}

#[test]
fn short_circuit_with_consume_macro() {
    let h_calls = Cell::new(0);

    let f = || -> Outcome<i32> {
        let a = consume!(Outcome::<i32>::failure(Mid::bare()));
        h_calls.set(h_calls.get() + 1);
        let b = consume!(Outcome::success(1));
        Outcome::success(a + b)
    };

    let outcome = f();
    assert_eq!(h_calls.get(), 0);
    assert_eq!(outcome.what().as_deref(), Some("Mid"));
}

#[test]
fn ordered_catch_runs_first_matching_handler() {
    common::init_test_logging();

    let root_handler_ran = Cell::new(false);
    let outcome = try_catch(
        || Outcome::<&str>::failure(Leaf::new("x")),
        vec![
            Handler::new(|_: &Mid| "h1"),
            Handler::new(|_: &RuntimeError| {
                root_handler_ran.set(true);
                "h2"
            }),
        ],
    );

    assert_eq!(outcome.value(), Some(&"h1"));
    assert!(!root_handler_ran.get());
}

#[test]
fn no_matching_handler_means_no_recovery() {
    let outcome = try_catch(
        || Outcome::<i32>::failure(Leaf::new("unhandled")),
        vec![
            Handler::new(|_: &Sibling| 0),
            Handler::new(|_: &ValueError| 0),
        ],
    );

    assert!(outcome.has_error());
    assert_eq!(outcome.error().map(|e| e.base_ids().clone()), Some(Leaf::base_ids()));
    assert!(outcome.get_exact::<Leaf>().is_some());
}

#[test]
fn zero_division_scenario() {
    common::init_test_logging();

    let f = fallible(|| {
        let a = Outcome::<i32>::failure(ZeroDivisionError::new("div by 0")).into_result()?;
        let b = Outcome::success(1).into_result()?;
        Ok(a + b)
    });

    assert!(f.has_error());
    let math = f.catch_as::<MathError>().expect("caught as MathError");
    assert_eq!(math.what(), "ZeroDivisionError: div by 0");
    assert!(f.catch_as::<ValueError>().is_none());
}

#[test]
fn sequence_stops_at_first_failure() {
    let calls = Cell::new(0);
    let calls_ref = &calls;
    let step = move |fail: bool| {
        let calls = calls_ref;
        move || {
            calls.set(calls.get() + 1);
            if fail {
                Outcome::failure(ValueError::new("step"))
            } else {
                Outcome::success(calls.get())
            }
        }
    };

    let outcome = sequence([step(false), step(true), step(false)]);
    assert_eq!(calls.get(), 2);
    assert!(outcome.catch_as::<ValueError>().is_some());
}
