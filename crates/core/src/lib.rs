// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! Foundational types shared across the collaborative editing backend: the
//! document and operation domain model. None of these types know how to be
//! serialized on the wire or persisted — that's `cloudocs-wire` and
//! `cloudocs-storage`.

mod operation;

pub use operation::{OpKind, Operation};

/// Opaque document identifier, as supplied by the external CRUD collaborator.
pub type DocumentId = String;

/// Opaque client identifier, supplied on the connection request. Never
/// authenticated by this system.
pub type ClientId = String;

/// Document metadata as stored by the external CRUD collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
	pub id: DocumentId,
	pub name: String,
	pub author: String,
}
