//! A generic transactional value container: an [`Atom`] adapter plugged
//! into a [`Transaction`] manager that records every mutation on a nested
//! commit tree and can undo or redo any still-live commit in that tree.
//!
//! There is no crate-owned configuration. The one thing an embedder may
//! tune is diagnostics: every mutation, begin/end, undo, and redo emits a
//! [`tracing`] event under the `xeno_transact` target, and whether that
//! goes anywhere at all is entirely up to whatever subscriber (if any) the
//! embedder installs.
//!
//! Two reference atoms ship in [`atom`]: [`atom::int::IntAtom`] for a bare
//! scalar, and [`atom::seq::SeqAtom`] for an ordered sequence. Either is a
//! reasonable template for a new [`Atom`] impl.

pub mod atom;
pub mod commit;
pub mod error;
pub mod manager;

pub use atom::Atom;
pub use commit::{CommitHandle, CommitId, CommitTag};
pub use error::TransactError;
pub use manager::Transaction;
