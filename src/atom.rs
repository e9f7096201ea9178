//! The atom adapter contract.
//!
//! An atom owns one live value of some type and is the sole authority on
//! what a mutation of that value meant and how to invert it. The manager
//! never inspects the value directly — it only ever calls through this
//! trait.

pub mod int;
pub mod seq;

/// Per-value-type adapter plugged into [`Transaction`](crate::Transaction).
///
/// `Op` is the finite, closed set of requestable operations; each variant
/// carries whatever parameters that operation needs (the spec's "kind may
/// take zero or more parameters at apply time" maps directly onto enum
/// variant payloads in Rust, rather than a separate params list).
///
/// `Record` is a self-contained description of one applied mutation,
/// sufficient to invert it without consulting any other state. Implementors
/// must uphold: applying `r` then `rollback(r)` leaves the atom bit-identical
/// to before, and `rollback(rollback(r))` is (up to the old/new swap) `r`
/// again.
pub trait Atom {
	/// The wrapped value type.
	type Value;
	/// Requestable operations, with their parameters as variant payloads.
	type Op;
	/// A self-contained, invertible description of one applied operation.
	type Record: Clone + std::fmt::Debug;

	/// Applies `op` to the wrapped value and returns a record describing it.
	///
	/// If `op` is not semantically possible against the current value, the
	/// implementation must return a `Fail`-equivalent record rather than
	/// mutate or panic; panics are reserved for internal inconsistency.
	fn apply(&mut self, op: Self::Op) -> Self::Record;

	/// Inverts `rec` against the current value, returning the record that
	/// describes the inverse. Precondition: the atom's current value is
	/// exactly the state `rec` left behind.
	fn rollback(&mut self, rec: &Self::Record) -> Self::Record;

	/// Human-readable dump of the current value, for tracing only.
	fn serialise_self(&self) -> String;

	/// Human-readable dump of a list of records, for tracing only.
	fn serialise_records(records: &[Self::Record]) -> String;

	/// Borrows the current value.
	fn peek(&self) -> &Self::Value;
}
