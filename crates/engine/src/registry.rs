// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The Operation Log, Text State, and per-document [`Registry`] (§4.2-§4.3).
//! Each document is serialized behind its own [`tokio::sync::Mutex`] so
//! concurrent clients of the *same* document never race, while different
//! documents proceed fully in parallel.

use std::sync::Arc;

use cloudocs_core::{DocumentId, Operation};
use cloudocs_storage::StorageGateway;
use cloudocs_transform::reconcile;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::Mutex;
use tracing::instrument;

use crate::apply::apply_operation;
use crate::error::{Error, Result};

/// In-memory state for one open document: every accepted operation in
/// arrival order, and the byte buffer that results from replaying them.
struct Bundle {
	log: Vec<Operation>,
	text: Vec<u8>,
}

pub struct DocumentHandle {
	id: DocumentId,
	bundle: Mutex<Bundle>,
}

impl DocumentHandle {
	fn new(id: DocumentId, text: Vec<u8>, log: Vec<Operation>) -> Self {
		Self { id, bundle: Mutex::new(Bundle { log, text }) }
	}

	/// The document's current server-version — the number of operations
	/// accepted into its log so far.
	pub async fn last_version(&self) -> u64 {
		self.bundle.lock().await.log.len() as u64
	}

	/// The document's current text, as last committed.
	pub async fn current_text(&self) -> Vec<u8> {
		self.bundle.lock().await.text.clone()
	}

	/// Reconciles `op` against every operation accepted after the version
	/// the client last saw, applies it to the text, persists the result,
	/// and only then commits it to the in-memory log (§4.3 steps 3-6).
	///
	/// If persistence fails, neither the log nor the text buffer are
	/// touched — the caller sees the document exactly as it was before
	/// this call, ready to retry or report the failure upstream.
	#[instrument(skip(self, storage, op), fields(document = %self.id), err)]
	pub async fn accept(&self, storage: &StorageGateway, op: Operation) -> Result<(Operation, u64)> {
		let mut bundle = self.bundle.lock().await;

		let seen = op.version as usize;
		if seen > bundle.log.len() {
			return Err(Error::InvalidOperation(format!(
				"operation claims version {} but the log only has {} entries",
				op.version,
				bundle.log.len()
			)));
		}

		let mut conflict_set: Vec<Operation> = bundle.log[seen..].to_vec();
		let transformed = reconcile(op, &mut conflict_set);

		let mut text = bundle.text.clone();
		apply_operation(&mut text, &transformed)?;

		storage.write_text(&self.id, &text).await?;

		bundle.log[seen..].clone_from_slice(&conflict_set);
		bundle.log.push(transformed.clone());
		bundle.text = text;

		let new_version = bundle.log.len() as u64;
		Ok((transformed, new_version))
	}
}

/// Tracks one [`DocumentHandle`] per open document, handing out a shared
/// handle to every caller asking for the same id.
pub struct Registry {
	storage: Arc<StorageGateway>,
	docs: DashMap<DocumentId, Arc<DocumentHandle>>,
}

impl Registry {
	pub fn new(storage: Arc<StorageGateway>) -> Self {
		Self { storage, docs: DashMap::new() }
	}

	pub fn storage(&self) -> &StorageGateway {
		&self.storage
	}

	pub async fn exists(&self, id: &DocumentId) -> Result<bool> {
		if self.docs.contains_key(id) {
			return Ok(true);
		}
		Ok(self.storage.exists(id).await?)
	}

	/// Returns the handle for `id`, loading its log-replay state from
	/// storage on first access. Operations are not persisted individually
	/// (§4.1: only the current text is durable), so a freshly-loaded
	/// document starts with an empty log — its version counter begins at
	/// zero for the purposes of new clients joining, not for conflict
	/// resolution against history that predates this process.
	#[instrument(skip(self), err)]
	pub async fn handle_for(&self, id: &DocumentId) -> Result<Arc<DocumentHandle>> {
		match self.docs.entry(id.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().clone()),
			Entry::Vacant(entry) => {
				let text = self.storage.read_text(id).await?;
				let handle = Arc::new(DocumentHandle::new(id.clone(), text, Vec::new()));
				entry.insert(handle.clone());
				Ok(handle)
			}
		}
	}

	/// Drops the in-memory handle for `id`. The document's text remains in
	/// storage; the next `handle_for` call reloads it with a fresh log.
	pub fn evict(&self, id: &DocumentId) {
		self.docs.remove(id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use cloudocs_core::{DocumentMeta, OpKind};
	use std::time::Duration;

	async fn seeded_registry(id: &str, text: &[u8]) -> (Registry, DocumentId) {
		let storage = StorageGateway::in_memory(Duration::from_secs(5)).await.unwrap();
		let meta = DocumentMeta { id: id.to_string(), name: "n".into(), author: "a".into() };
		storage.write_metadata(&meta).await.unwrap();
		storage.write_text(&meta.id, text).await.unwrap();
		(Registry::new(Arc::new(storage)), meta.id)
	}

	fn insert(index: i64, len: i64, text: &str, version: u64) -> Operation {
		Operation { kind: OpKind::Insert, index, len, text: text.as_bytes().to_vec(), version }
	}

	#[tokio::test]
	async fn sequential_insert_advances_version_and_text() {
		let (registry, id) = seeded_registry("doc-1", b"abc").await;
		let handle = registry.handle_for(&id).await.unwrap();

		let (accepted, version) = handle.accept(registry.storage(), insert(3, 1, "d", 0)).await.unwrap();
		assert_eq!(version, 1);
		assert_eq!(accepted.index, 3);
		assert_eq!(handle.current_text().await, b"abcd");
	}

	#[tokio::test]
	async fn concurrent_insert_is_shifted_against_already_accepted_op() {
		let (registry, id) = seeded_registry("doc-2", b"").await;
		let handle = registry.handle_for(&id).await.unwrap();

		// A accepts an insert at 0 first.
		handle.accept(registry.storage(), insert(0, 1, "X", 0)).await.unwrap();
		// B sends an insert at 0 that never saw A's op (version still 0).
		let (transformed, version) = handle.accept(registry.storage(), insert(0, 1, "Y", 0)).await.unwrap();

		assert_eq!(version, 2);
		assert_eq!(transformed.index, 1);
		assert_eq!(handle.current_text().await, b"XY");
	}

	#[tokio::test]
	async fn operation_claiming_a_future_version_is_rejected() {
		let (registry, id) = seeded_registry("doc-3", b"abc").await;
		let handle = registry.handle_for(&id).await.unwrap();

		let err = handle.accept(registry.storage(), insert(3, 1, "d", 5)).await.unwrap_err();
		assert!(matches!(err, Error::InvalidOperation(_)));
		assert_eq!(handle.current_text().await, b"abc");
	}

	#[tokio::test]
	async fn handle_for_returns_the_same_handle_on_repeat_access() {
		let (registry, id) = seeded_registry("doc-4", b"x").await;
		let a = registry.handle_for(&id).await.unwrap();
		let b = registry.handle_for(&id).await.unwrap();
		assert!(Arc::ptr_eq(&a, &b));
	}

	#[tokio::test]
	async fn evict_forces_a_fresh_load_on_next_access() {
		let (registry, id) = seeded_registry("doc-5", b"x").await;
		let a = registry.handle_for(&id).await.unwrap();
		registry.evict(&id);
		let b = registry.handle_for(&id).await.unwrap();
		assert!(!Arc::ptr_eq(&a, &b));
	}
}
