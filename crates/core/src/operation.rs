// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

/// The kind of edit an [`Operation`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
	Insert,
	Delete,
}

/// A single client-originated edit against a document's byte buffer.
///
/// `index`/`len`/`text` are interpreted according to `kind`; see
/// `cloudocs-transform` and `cloudocs-engine` for the exact semantics. This
/// type intentionally carries no notion of "accepted" vs "pending" — the
/// operation log is what gives an `Operation` a server-version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
	pub kind: OpKind,
	/// INSERT: insertion point. DELETE: inclusive upper bound of the
	/// removed range (see the engine's apply rule for the exact,
	/// intentionally asymmetric behavior preserved from the source).
	pub index: i64,
	/// INSERT: byte length of `text`. DELETE: number of bytes requested
	/// for removal (the apply rule does not always honor this exactly,
	/// again preserved from the source).
	pub len: i64,
	/// Bytes inserted. Empty for DELETE.
	pub text: Vec<u8>,
	/// The last server-version the client had observed when it produced
	/// this operation.
	pub version: u64,
}
