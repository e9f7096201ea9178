//! Reference atom for scalar, integer-like values.
//!
//! Supports a single operation, `Modify`, which replaces the value outright.
//! There is no failure mode: any `T` is a legal replacement, so this atom
//! never produces a `Fail`-equivalent record.

use itertools::Itertools;

use super::Atom;

/// The one operation [`IntAtom`] supports: replace the value with `new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntOp<T> {
	Modify(T),
}

/// Records the value before and after a `Modify`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRecord<T> {
	pub old: T,
	pub new: T,
}

/// Atom wrapping a single scalar value of type `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntAtom<T> {
	value: T,
}

impl<T> IntAtom<T> {
	/// Creates an atom initialised to `value`.
	pub fn new(value: T) -> Self {
		Self { value }
	}
}

impl<T> Atom for IntAtom<T>
where
	T: Copy + std::fmt::Display,
{
	type Value = T;
	type Op = IntOp<T>;
	type Record = IntRecord<T>;

	fn apply(&mut self, op: Self::Op) -> Self::Record {
		let IntOp::Modify(new) = op;
		let old = self.value;
		self.value = new;
		IntRecord { old, new }
	}

	fn rollback(&mut self, rec: &Self::Record) -> Self::Record {
		debug_assert_eq!(self.value, rec.new, "rollback precondition: atom must be in the state `rec` left it in");
		self.value = rec.old;
		IntRecord {
			old: rec.new,
			new: rec.old,
		}
	}

	fn serialise_self(&self) -> String {
		self.value.to_string()
	}

	fn serialise_records(records: &[Self::Record]) -> String {
		records
			.iter()
			.map(|r| format!("{{old={}, new={}}}", r.old, r.new))
			.join(" ")
	}

	fn peek(&self) -> &Self::Value {
		&self.value
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn modify_swaps_value_and_records_both_sides() {
		let mut atom = IntAtom::new(0i64);
		let rec = atom.apply(IntOp::Modify(5));
		assert_eq!(*atom.peek(), 5);
		assert_eq!(rec, IntRecord { old: 0, new: 5 });
	}

	#[test]
	fn rollback_restores_previous_value_and_is_self_inverse() {
		let mut atom = IntAtom::new(0i64);
		let rec = atom.apply(IntOp::Modify(5));
		let inv = atom.rollback(&rec);
		assert_eq!(*atom.peek(), 0);
		assert_eq!(inv, IntRecord { old: 5, new: 0 });

		let inv2 = atom.rollback(&inv);
		assert_eq!(*atom.peek(), 5);
		assert_eq!(inv2, rec);
	}

	#[test]
	fn serialise_records_is_human_readable() {
		let recs = [IntRecord { old: 0, new: 1 }, IntRecord { old: 1, new: 2 }];
		let text = IntAtom::<i32>::serialise_records(&recs);
		assert_eq!(text, "{old=0, new=1} {old=1, new=2}");
	}
}
