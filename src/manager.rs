//! The transaction manager: commit tree, cursor, and the undo/redo scans.
//!
//! [`Transaction<A>`] wraps one [`Atom`] and owns the entire commit forest in
//! a flat arena (see [`crate::commit`]). Everything here is synchronous and
//! single-threaded by design (spec §5) — there is no queueing, no locking,
//! and no concurrent mutation story to get right.

use tracing::trace;

use crate::atom::Atom;
use crate::commit::{CommitHandle, CommitId, CommitNode, CommitTag};
use crate::error::TransactError;

/// Wraps an [`Atom`] with a nestable, undo/redo-able transaction history.
#[derive(Debug)]
pub struct Transaction<A: Atom> {
	atom: A,
	arena: Vec<CommitNode<A::Record>>,
	root: Vec<CommitHandle>,
	cursor: Option<CommitHandle>,
	next_id: u64,
}

impl<A: Atom> Transaction<A> {
	/// Wraps `atom` in a fresh manager with an empty history and no open
	/// transaction.
	pub fn new(atom: A) -> Self {
		Self {
			atom,
			arena: Vec::new(),
			root: Vec::new(),
			cursor: None,
			next_id: 0,
		}
	}

	/// Returns `true` while a transaction is open (the cursor is set).
	pub fn in_transaction(&self) -> bool {
		self.cursor.is_some()
	}

	/// Borrows the wrapped value.
	pub fn peek(&self) -> &A::Value {
		self.atom.peek()
	}

	/// Opens a new nested (or top-level) transaction and returns its id.
	///
	/// Does not touch the atom. The new commit is appended as the last
	/// child of the current cursor, or to the root forest if no transaction
	/// is open, and becomes the new cursor.
	pub fn begin_transaction(&mut self) -> CommitId {
		let id = self.alloc_id();
		let parent = self.cursor;
		let handle = self.push_node(CommitNode::new(id, CommitTag::BeginTrans, parent));

		trace!(
			target: "xeno_transact",
			depth = CommitNode::depth(handle, &self.arena),
			commit_id = id.get(),
			"begin transaction"
		);

		self.attach(handle, parent);
		self.cursor = Some(handle);
		id
	}

	/// Closes the innermost open transaction, flips its tag to `EndTrans`,
	/// and moves the cursor to its parent.
	///
	/// Returns [`CommitId::EMPTY_TRANSACTION`] if no transaction was open.
	pub fn end_transaction(&mut self) -> CommitId {
		let Some(cursor) = self.cursor else {
			return CommitId::EMPTY_TRANSACTION;
		};

		let node = &mut self.arena[cursor.0];
		node.tag = CommitTag::EndTrans;
		let id = node.id;
		let record_count = node.records.len();

		trace!(
			target: "xeno_transact",
			depth = CommitNode::depth(cursor, &self.arena),
			commit_id = id.get(),
			records = record_count,
			dump = %A::serialise_records(&self.arena[cursor.0].records),
			"end transaction"
		);

		self.cursor = self.arena[cursor.0].parent;
		id
	}

	/// Applies `op` to the atom and records it against the open transaction.
	///
	/// # Panics
	/// Panics if no transaction is open. Use [`Self::try_modify`] for a
	/// non-panicking variant.
	pub fn modify(&mut self, op: A::Op) -> A::Record {
		self.try_modify(op).expect("modify called with no open transaction")
	}

	/// Fallible counterpart to [`Self::modify`].
	pub fn try_modify(&mut self, op: A::Op) -> Result<A::Record, TransactError> {
		let cursor = self.cursor.ok_or(TransactError::NotInTransaction)?;
		let record = self.atom.apply(op);
		self.arena[cursor.0].records.push(record.clone());

		trace!(
			target: "xeno_transact",
			commit_id = self.arena[cursor.0].id.get(),
			value = %self.atom.serialise_self(),
			"modify"
		);

		Ok(record)
	}

	/// Undoes the innermost still-live commit at the current scope (the
	/// open cursor's children, or the root forest if no transaction is
	/// open). No-op if there is nothing to undo, including when an
	/// unclosed sibling transaction blocks the scan (spec §4.2, testable
	/// property 7).
	pub fn undo(&mut self) -> bool {
		let scope = self.scope();
		let Some(target) = self.find_undo_target(&scope) else {
			trace!(target: "xeno_transact", "undo: nothing to undo");
			return false;
		};
		self.undo_commit(target);
		true
	}

	/// Redoes the innermost still-live `Undo` at the current scope. See
	/// [`Self::undo`] for scope selection.
	pub fn redo(&mut self) -> bool {
		let scope = self.scope();
		let Some(target) = self.find_redo_target(&scope) else {
			trace!(target: "xeno_transact", "redo: nothing to redo");
			return false;
		};
		self.redo_commit(target);
		true
	}

	fn scope(&self) -> Vec<CommitHandle> {
		match self.cursor {
			Some(cursor) => self.arena[cursor.0].children.clone(),
			None => self.root.clone(),
		}
	}

	fn alloc_id(&mut self) -> CommitId {
		let id = CommitId::new(self.next_id);
		self.next_id += 1;
		id
	}

	fn push_node(&mut self, node: CommitNode<A::Record>) -> CommitHandle {
		let handle = CommitHandle(self.arena.len());
		self.arena.push(node);
		handle
	}

	fn attach(&mut self, handle: CommitHandle, parent: Option<CommitHandle>) {
		match parent {
			Some(p) => self.arena[p.0].children.push(handle),
			None => self.root.push(handle),
		}
	}

	/// Innermost-in-time `EndTrans` at `scope` whose effect is still live.
	///
	/// Scans newest to oldest maintaining a net balance of unmatched
	/// compensations: `Undo` increments it (one more undo than redo still
	/// pending), `Redo` decrements it. An `EndTrans` is the target only
	/// once the balance is back to zero. A `BeginTrans` is a hard stop —
	/// an open sibling transaction blocks undo at this scope entirely
	/// (spec §4.2, testable property 7).
	fn find_undo_target(&self, scope: &[CommitHandle]) -> Option<CommitHandle> {
		let mut balance: i64 = 0;
		for &handle in scope.iter().rev() {
			match self.arena[handle.0].tag {
				CommitTag::BeginTrans => return None,
				CommitTag::EndTrans => {
					if balance == 0 {
						return Some(handle);
					}
					balance -= 1;
				}
				CommitTag::Undo => balance += 1,
				CommitTag::Redo => balance -= 1,
			}
		}
		None
	}

	/// Innermost-in-time `Undo` at `scope` whose effect is still live.
	/// Symmetric to [`Self::find_undo_target`]; both `BeginTrans` and
	/// `EndTrans` are hard stops here — redo only ever crosses
	/// compensations, never back past a real commit.
	fn find_redo_target(&self, scope: &[CommitHandle]) -> Option<CommitHandle> {
		let mut balance: i64 = 0;
		for &handle in scope.iter().rev() {
			match self.arena[handle.0].tag {
				CommitTag::BeginTrans | CommitTag::EndTrans => return None,
				CommitTag::Undo => {
					if balance == 0 {
						return Some(handle);
					}
					balance -= 1;
				}
				CommitTag::Redo => balance += 1,
			}
		}
		None
	}

	/// Undoes `target` (an `EndTrans` commit), first recursively draining
	/// any of its still-live children so the atom's state exactly matches
	/// what `target`'s own records left behind, then appending a new
	/// `Undo` sibling holding the reverse-order inversion of its records.
	///
	/// Termination of the drain loop: each iteration either finds no
	/// target (loop ends) or consumes exactly one unmatched compensation
	/// from `find_undo_target`'s net-balance scan — the same scan that
	/// decides whether to keep going, not an iteration counter. A newly
	/// appended `Undo` sibling shifts that balance, so the loop cannot
	/// spin on the commit it just produced.
	fn undo_commit(&mut self, target: CommitHandle) {
		debug_assert_eq!(self.arena[target.0].tag, CommitTag::EndTrans, "undo target must be an EndTrans commit");

		loop {
			let children = self.arena[target.0].children.clone();
			let Some(child_target) = self.find_undo_target(&children) else {
				break;
			};
			self.undo_commit(child_target);
		}

		trace!(
			target: "xeno_transact",
			commit_id = self.arena[target.0].id.get(),
			"undo transaction"
		);

		let records = self.arena[target.0].records.clone();
		let mut inverses = Vec::with_capacity(records.len());
		for record in records.iter().rev() {
			inverses.push(self.atom.rollback(record));
		}

		let parent = self.arena[target.0].parent;
		let id = self.alloc_id();
		let mut node = CommitNode::new(id, CommitTag::Undo, parent);
		node.records = inverses;
		let handle = self.push_node(node);
		self.attach(handle, parent);
	}

	/// Redoes `target` (an `Undo` commit) by the same recursive-drain,
	/// then-compensate pattern as [`Self::undo_commit`].
	///
	/// This rolls `target`'s own records back again rather than
	/// re-applying the original mutation directly. That is correct only
	/// because `rollback` applied to an already-inverted record yields the
	/// original mutation (the self-inverse property every [`Atom`] impl
	/// must uphold) — see spec §9, redesign note 2.
	fn redo_commit(&mut self, target: CommitHandle) {
		debug_assert_eq!(self.arena[target.0].tag, CommitTag::Undo, "redo target must be an Undo commit");

		loop {
			let children = self.arena[target.0].children.clone();
			let Some(child_target) = self.find_redo_target(&children) else {
				break;
			};
			self.redo_commit(child_target);
		}

		trace!(
			target: "xeno_transact",
			commit_id = self.arena[target.0].id.get(),
			"redo transaction"
		);

		let records = self.arena[target.0].records.clone();
		let mut inverses = Vec::with_capacity(records.len());
		for record in records.iter().rev() {
			inverses.push(self.atom.rollback(record));
		}

		let parent = self.arena[target.0].parent;
		let id = self.alloc_id();
		let mut node = CommitNode::new(id, CommitTag::Redo, parent);
		node.records = inverses;
		let handle = self.push_node(node);
		self.attach(handle, parent);
	}
}

#[cfg(test)]
mod proptests;
