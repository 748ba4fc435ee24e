//! Property-based tests for outcome classification and composition
//!
//! Generates messages, nesting depths, step lists and handler orderings and
//! checks that classification survives composition and that catching always
//! picks the first matching handler.

use std::cell::Cell;

use proptest::prelude::*;

use erxpected::prelude::*;
use erxpected::sequence;

declare_error_kind! {
    pub struct StageError: RuntimeError;
    pub struct StageTimeout: StageError;
    pub struct Unrelated: RuntimeError;
}

/// Handler kinds a generated catch list can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Root,
    Stage,
    Timeout,
    Other,
}

impl Slot {
    fn catches_timeout(self) -> bool {
        !matches!(self, Slot::Other)
    }

    fn handler<'a>(self, index: usize) -> Handler<'a, usize> {
        match self {
            Slot::Root => Handler::new(move |_: &RuntimeError| index),
            Slot::Stage => Handler::new(move |_: &StageError| index),
            Slot::Timeout => Handler::new(move |_: &StageTimeout| index),
            Slot::Other => Handler::new(move |_: &Unrelated| index),
        }
    }
}

fn slot_strategy() -> impl Strategy<Value = Slot> {
    prop_oneof![
        Just(Slot::Root),
        Just(Slot::Stage),
        Just(Slot::Timeout),
        Just(Slot::Other),
    ]
}

fn message_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ./]{1,32}"
}

fn nested(depth: usize, message: &str) -> Outcome<i64> {
    if depth == 0 {
        return Outcome::failure(StageTimeout::new(message));
    }
    fallible(|| {
        let inner = nested(depth - 1, message).into_result()?;
        Ok(inner + 1)
    })
}

proptest! {
    #[test]
    fn base_views_render_concrete_kind(message in message_strategy()) {
        let outcome: Outcome<()> = Outcome::failure(ZeroDivisionError::new(message.clone()));
        let expected = format!("ZeroDivisionError: {}", message);

        prop_assert_eq!(outcome.catch_as::<MathError>().map(|e| e.what()), Some(expected.clone()));
        prop_assert_eq!(outcome.catch_as::<RuntimeError>().map(|e| e.what()), Some(expected.clone()));
        prop_assert!(outcome.get_exact::<MathError>().is_none());
        prop_assert_eq!(outcome.what(), Some(expected));
    }

    #[test]
    fn nesting_never_changes_classification(depth in 0usize..24, message in message_strategy()) {
        let outcome = nested(depth, &message);
        let error = outcome.error().expect("nested failure");

        prop_assert_eq!(error.base_ids(), &StageTimeout::base_ids());
        prop_assert!(outcome.catch_as::<StageError>().is_some());
        prop_assert!(outcome.catch_as::<Unrelated>().is_none());
        prop_assert_eq!(error.what(), format!("StageTimeout: {}", message));
    }

    #[test]
    fn sequence_stops_at_first_failure(flags in proptest::collection::vec(any::<bool>(), 0..16)) {
        let calls = Cell::new(0usize);
        let calls_ref = &calls;
        let steps: Vec<_> = flags
            .iter()
            .enumerate()
            .map(|(index, &fails)| {
                move || {
                    calls_ref.set(calls_ref.get() + 1);
                    if fails {
                        Outcome::failure(StageError::new(index.to_string()))
                    } else {
                        Outcome::success(index)
                    }
                }
            })
            .collect();

        let outcome = sequence(steps);

        match flags.iter().position(|&fails| fails) {
            Some(first) => {
                prop_assert_eq!(calls.get(), first + 1);
                prop_assert_eq!(outcome.what(), Some(format!("StageError: {}", first)));
            }
            None => {
                prop_assert_eq!(calls.get(), flags.len());
                prop_assert_eq!(outcome.value().map(Vec::len), Some(flags.len()));
            }
        }
    }

    #[test]
    fn catch_picks_first_matching_slot(slots in proptest::collection::vec(slot_strategy(), 0..8)) {
        let handlers: Vec<_> = slots
            .iter()
            .enumerate()
            .map(|(index, slot)| slot.handler(index))
            .collect();

        let outcome = try_catch(|| Outcome::failure(StageTimeout::bare()), handlers);

        match slots.iter().position(|slot| slot.catches_timeout()) {
            Some(first) => {
                prop_assert_eq!(outcome.value(), Some(&first));
            }
            None => {
                prop_assert!(outcome.has_error());
                prop_assert!(outcome.get_exact::<StageTimeout>().is_some());
            }
        }
    }
}
