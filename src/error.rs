//! The one checked failure mode the public API exposes.
//!
//! Everything else in the manager is either an in-band `Fail` record (a
//! recoverable domain failure the atom itself decides on, e.g.
//! [`SeqRecord::Fail`](crate::atom::seq::SeqRecord::Fail)) or a
//! `debug_assert!`/`assert!` on a broken invariant (misuse). `TransactError`
//! exists only for embedders who prefer `Result` over a panic at the single
//! public seam where that's a real choice:
//! [`Transaction::try_modify`](crate::Transaction::try_modify).

use thiserror::Error;

/// Fallible counterpart to the panicking `Transaction` API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactError {
	/// `modify` was attempted with no open transaction.
	#[error("modify called with no open transaction")]
	NotInTransaction,
}
