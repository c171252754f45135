// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use serde::{Deserialize, Serialize};

use cloudocs_core::{OpKind, Operation as CoreOperation};

/// Sent once, right after registration, carrying enough state for the client
/// to reconstruct the document without replaying history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Init {
	pub document_name: String,
	pub text: String,
	pub last_version: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OpType {
	Insert,
	Delete,
}

impl From<OpKind> for OpType {
	fn from(kind: OpKind) -> Self {
		match kind {
			OpKind::Insert => OpType::Insert,
			OpKind::Delete => OpType::Delete,
		}
	}
}

impl From<OpType> for OpKind {
	fn from(ty: OpType) -> Self {
		match ty {
			OpType::Insert => OpKind::Insert,
			OpType::Delete => OpKind::Delete,
		}
	}
}

/// The wire representation of [`cloudocs_core::Operation`]. Kept as a
/// separate type (rather than deriving serde on the core type directly) so
/// the domain model stays free of wire concerns such as field casing and
/// `deny_unknown_fields`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Operation {
	#[serde(rename = "type")]
	pub kind: OpType,
	pub index: i64,
	pub len: i64,
	pub text: String,
	pub version: u64,
}

impl From<&CoreOperation> for Operation {
	fn from(op: &CoreOperation) -> Self {
		Operation {
			kind: op.kind.into(),
			index: op.index,
			len: op.len,
			text: String::from_utf8_lossy(&op.text).into_owned(),
			version: op.version,
		}
	}
}

impl From<Operation> for CoreOperation {
	fn from(op: Operation) -> Self {
		CoreOperation {
			kind: op.kind.into(),
			index: op.index,
			len: op.len,
			text: op.text.into_bytes(),
			version: op.version,
		}
	}
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperationAck {
	pub last_version: u64,
}
