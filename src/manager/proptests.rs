//! Property-based coverage for testable properties 3 and 6 (spec §8):
//! round-tripping over arbitrary undo/redo chains, and strict id
//! monotonicity, generalised over randomly generated commit sequences.

use proptest::prelude::*;

use super::*;
use crate::atom::int::{IntAtom, IntOp};

proptest! {
	/// `undo^n . redo^n` after `n` sequential top-level commits restores the
	/// post-commit state, and further undo/redo beyond what's available is
	/// a no-op (spec §8, property 3).
	#[test]
	fn undo_redo_round_trip_is_identity(values in proptest::collection::vec(any::<i32>(), 1..8)) {
		let mut t = Transaction::new(IntAtom::new(0i32));
		for &v in &values {
			t.begin_transaction();
			t.modify(IntOp::Modify(v));
			t.end_transaction();
		}
		let post_commit = *t.peek();

		for _ in 0..values.len() {
			t.undo();
		}
		for _ in 0..values.len() {
			t.redo();
		}
		prop_assert_eq!(*t.peek(), post_commit);

		for _ in 0..3 {
			t.undo();
		}
		for _ in 0..3 {
			t.redo();
		}
		prop_assert_eq!(*t.peek(), post_commit);
	}

	/// Every `begin_transaction`/`end_transaction` id is strictly greater
	/// than every previously minted id (spec §8, property 6).
	#[test]
	fn commit_ids_are_strictly_increasing(values in proptest::collection::vec(any::<i32>(), 1..8)) {
		let mut t = Transaction::new(IntAtom::new(0i32));
		let mut last = None::<CommitId>;

		for &v in &values {
			let begin_id = t.begin_transaction();
			if let Some(prev) = last {
				prop_assert!(begin_id > prev);
			}
			t.modify(IntOp::Modify(v));
			let end_id = t.end_transaction();
			prop_assert!(end_id > begin_id);
			last = Some(end_id);
		}
	}

	/// Undoing a closed sibling never perturbs the state left by an
	/// earlier closed sibling (spec §8, property 4), generalised across
	/// an arbitrary number of siblings.
	#[test]
	fn undo_never_leaks_past_earlier_sealed_siblings(values in proptest::collection::vec(any::<i32>(), 2..8)) {
		let mut t = Transaction::new(IntAtom::new(0i32));
		for &v in &values {
			t.begin_transaction();
			t.modify(IntOp::Modify(v));
			t.end_transaction();
		}

		// Undo every sibling except the very first, newest-first.
		for _ in 0..(values.len() - 1) {
			prop_assert!(t.undo());
		}

		prop_assert_eq!(*t.peek(), values[0]);
	}
}
