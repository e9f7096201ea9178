//! Reference atom for an ordered sequence (`Vec<T>`).
//!
//! Supports `Modify`, `Insert`, and `Erase`. Requests with an out-of-range
//! offset do not mutate the sequence or panic: they produce a `Fail` record,
//! whose rollback is the identity (see spec §4.1/§7 — recoverable domain
//! failure, reported in-band rather than as an exception).

use itertools::Itertools;

use super::Atom;

/// Requestable operations against a [`SeqAtom`].
///
/// `Insert` accepts `offset == len` (append); `Modify`/`Erase` require
/// `offset < len`. Out-of-range requests are not rejected here — they are
/// validated inside `apply` and turned into a `Fail` record.
#[derive(Debug, Clone)]
pub enum SeqOp<T> {
	Modify { offset: usize, val: T },
	Insert { offset: usize, val: T },
	Erase { offset: usize },
}

/// A self-contained, invertible description of one applied sequence edit.
///
/// A true sum type rather than a tag-plus-dummy-fields struct: per spec §9's
/// design note, languages with sum types should use one directly instead of
/// padding `Fail` with placeholder values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeqRecord<T> {
	Modify { offset: usize, old: T, new: T },
	Insert { offset: usize, val: T },
	Erase { offset: usize, val: T },
	/// The requested operation was not semantically possible; no mutation
	/// occurred. Rolling this back is a no-op that yields another `Fail`.
	Fail { offset: usize },
}

/// Atom wrapping an ordered sequence of `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqAtom<T> {
	value: Vec<T>,
}

impl<T> SeqAtom<T> {
	/// Creates an atom initialised from `value`.
	pub fn new(value: Vec<T>) -> Self {
		Self { value }
	}

	/// Creates an atom with `value` repeated `len` times, matching the
	/// `(len, fill)` constructor shape the source's `AtomIntVector` uses.
	pub fn with_fill(len: usize, fill: T) -> Self
	where
		T: Clone,
	{
		Self {
			value: vec![fill; len],
		}
	}
}

impl<T> Atom for SeqAtom<T>
where
	T: Clone + std::fmt::Debug,
{
	type Value = Vec<T>;
	type Op = SeqOp<T>;
	type Record = SeqRecord<T>;

	fn apply(&mut self, op: Self::Op) -> Self::Record {
		match op {
			SeqOp::Modify { offset, val } => {
				if offset >= self.value.len() {
					return SeqRecord::Fail { offset };
				}
				let old = std::mem::replace(&mut self.value[offset], val.clone());
				SeqRecord::Modify { offset, old, new: val }
			}
			SeqOp::Insert { offset, val } => {
				if offset > self.value.len() {
					return SeqRecord::Fail { offset };
				}
				self.value.insert(offset, val.clone());
				SeqRecord::Insert { offset, val }
			}
			SeqOp::Erase { offset } => {
				if offset >= self.value.len() {
					return SeqRecord::Fail { offset };
				}
				let val = self.value.remove(offset);
				SeqRecord::Erase { offset, val }
			}
		}
	}

	fn rollback(&mut self, rec: &Self::Record) -> Self::Record {
		match rec {
			SeqRecord::Modify { offset, old, new } => {
				debug_assert_eq!(
					self.value.get(*offset),
					Some(new),
					"rollback precondition: atom must be in the state `rec` left it in"
				);
				self.value[*offset] = old.clone();
				SeqRecord::Modify {
					offset: *offset,
					old: new.clone(),
					new: old.clone(),
				}
			}
			SeqRecord::Insert { offset, val } => {
				debug_assert_eq!(self.value.get(*offset), Some(val));
				let erased = self.value.remove(*offset);
				SeqRecord::Erase {
					offset: *offset,
					val: erased,
				}
			}
			SeqRecord::Erase { offset, val } => {
				self.value.insert(*offset, val.clone());
				SeqRecord::Insert {
					offset: *offset,
					val: val.clone(),
				}
			}
			SeqRecord::Fail { offset } => SeqRecord::Fail { offset: *offset },
		}
	}

	fn serialise_self(&self) -> String {
		format!("{{{}}}", self.value.iter().map(|v| format!("{v:?}")).join(" "))
	}

	fn serialise_records(records: &[Self::Record]) -> String {
		records
			.iter()
			.map(|r| match r {
				SeqRecord::Modify { offset, old, new } => {
					format!("{{offset={offset}, kind=Modify, old={old:?}, new={new:?}}}")
				}
				SeqRecord::Insert { offset, val } => {
					format!("{{offset={offset}, kind=Insert, val={val:?}}}")
				}
				SeqRecord::Erase { offset, val } => {
					format!("{{offset={offset}, kind=Erase, val={val:?}}}")
				}
				SeqRecord::Fail { offset } => format!("{{offset={offset}, kind=Fail}}"),
			})
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
	fn insert_at_len_appends() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Insert { offset: 1, val: 1 });
		assert_eq!(atom.peek(), &vec![0, 1]);
		assert_eq!(rec, SeqRecord::Insert { offset: 1, val: 1 });
	}

	#[test]
	fn insert_past_end_fails_without_mutating() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Insert { offset: 5, val: 9 });
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(rec, SeqRecord::Fail { offset: 5 });
	}

	#[test]
	fn modify_out_of_range_fails() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Modify { offset: 3, val: 9 });
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(rec, SeqRecord::Fail { offset: 3 });
	}

	#[test]
	fn erase_out_of_range_fails() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Erase { offset: 3 });
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(rec, SeqRecord::Fail { offset: 3 });
	}

	#[test]
	fn rollback_of_fail_is_identity() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Erase { offset: 7 });
		let inv = atom.rollback(&rec);
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(inv, SeqRecord::Fail { offset: 7 });
	}

	#[test]
	fn rollback_insert_erases() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Insert { offset: 0, val: 1 });
		assert_eq!(atom.peek(), &vec![1, 0]);

		let inv = atom.rollback(&rec);
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(inv, SeqRecord::Erase { offset: 0, val: 1 });
	}

	#[test]
	fn rollback_erase_reinserts() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Erase { offset: 0 });
		assert_eq!(atom.peek(), &Vec::<i32>::new());

		let inv = atom.rollback(&rec);
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(inv, SeqRecord::Insert { offset: 0, val: 0 });
	}

	#[test]
	fn rollback_modify_writes_old_back() {
		let mut atom = SeqAtom::new(vec![0]);
		let rec = atom.apply(SeqOp::Modify { offset: 0, val: 1 });
		let inv = atom.rollback(&rec);
		assert_eq!(atom.peek(), &vec![0]);
		assert_eq!(inv, SeqRecord::Modify { offset: 0, old: 1, new: 0 });
	}

	#[test]
	fn with_fill_constructs_repeated_value() {
		let atom = SeqAtom::with_fill(3, 7);
		assert_eq!(atom.peek(), &vec![7, 7, 7]);
	}
}
