// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! Text State (§4.3 step 4): applies a single transformed [`Operation`] to
//! the current byte buffer. Deliberately preserves the source's asymmetric
//! DELETE rule rather than "fixing" it — see the open question in the
//! design notes.

use cloudocs_core::{OpKind, Operation};

use crate::error::{Error, Result};

pub fn apply_operation(text: &mut Vec<u8>, op: &Operation) -> Result<()> {
	match op.kind {
		OpKind::Insert => apply_insert(text, op),
		OpKind::Delete => apply_delete(text, op),
	}
}

fn apply_insert(text: &mut Vec<u8>, op: &Operation) -> Result<()> {
	let len = text.len() as i64;
	if op.index < 0 || op.index > len {
		return Err(Error::InvalidOperation(format!("insert index {} out of range [0, {}]", op.index, len)));
	}
	if op.len != op.text.len() as i64 {
		return Err(Error::InvalidOperation(format!(
			"insert len {} does not match text length {}",
			op.len,
			op.text.len()
		)));
	}
	let index = op.index as usize;
	text.splice(index..index, op.text.iter().copied());
	Ok(())
}

/// DELETE: `op.index` is the high end of the removed range. When the index
/// sits at end-of-text, the removed range is `[index - len, index)`. When
/// it doesn't, the removed range is `[index - len + 1, index]` — `index`
/// itself is included. This inconsistency is preserved from the source
/// (§9): do not unify the two branches.
fn apply_delete(text: &mut Vec<u8>, op: &Operation) -> Result<()> {
	if op.len < 1 {
		return Err(Error::InvalidOperation(format!("delete len {} must be >= 1", op.len)));
	}
	let len = text.len() as i64;

	if op.index == len {
		let start = op.index - op.len;
		if start < 0 || start > len {
			return Err(Error::InvalidOperation(format!("delete range [{}, {}) out of bounds", start, len)));
		}
		text.truncate(start as usize);
	} else {
		let start = op.index - op.len + 1;
		let end = op.index + 1;
		if start < 0 || end > len || start > end {
			return Err(Error::InvalidOperation(format!("delete range [{}, {}] out of bounds", start, op.index)));
		}
		text.drain(start as usize..end as usize);
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use cloudocs_core::OpKind;

	fn op(kind: OpKind, index: i64, len: i64, text: &str) -> Operation {
		Operation { kind, index, len, text: text.as_bytes().to_vec(), version: 0 }
	}

	#[test]
	fn insert_at_zero_on_empty_text() {
		let mut text = Vec::new();
		apply_operation(&mut text, &op(OpKind::Insert, 0, 5, "hello")).unwrap();
		assert_eq!(text, b"hello");
	}

	#[test]
	fn insert_append_at_end() {
		let mut text = b"foo".to_vec();
		apply_operation(&mut text, &op(OpKind::Insert, 3, 3, "bar")).unwrap();
		assert_eq!(text, b"foobar");
	}

	#[test]
	fn insert_out_of_range_is_rejected() {
		let mut text = b"foo".to_vec();
		assert!(apply_operation(&mut text, &op(OpKind::Insert, 4, 1, "x")).is_err());
	}

	#[test]
	fn insert_len_mismatch_is_rejected() {
		let mut text = b"foo".to_vec();
		assert!(apply_operation(&mut text, &op(OpKind::Insert, 0, 2, "x")).is_err());
	}

	#[test]
	fn delete_at_end_of_text_uses_exclusive_branch() {
		let mut text = b"hello".to_vec();
		apply_operation(&mut text, &op(OpKind::Delete, 5, 2, "")).unwrap();
		assert_eq!(text, b"hel");
	}

	#[test]
	fn delete_in_interior_includes_index_itself() {
		// text "hello", delete len=2 ending at index 3 ('l', 0-based) -> removes [2,3] ("ll")
		let mut text = b"hello".to_vec();
		apply_operation(&mut text, &op(OpKind::Delete, 3, 2, "")).unwrap();
		assert_eq!(text, b"heo");
	}

	#[test]
	fn delete_zero_len_is_rejected() {
		let mut text = b"hello".to_vec();
		assert!(apply_operation(&mut text, &op(OpKind::Delete, 3, 0, "")).is_err());
	}

	#[test]
	fn delete_out_of_range_is_rejected() {
		let mut text = b"hi".to_vec();
		assert!(apply_operation(&mut text, &op(OpKind::Delete, 2, 5, "")).is_err());
	}
}
