// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use std::sync::Arc;
use std::time::Duration;

use cloudocs_core::{DocumentMeta, OpKind, Operation};
use cloudocs_engine::{Error, Registry};
use cloudocs_storage::StorageGateway;

fn insert(index: i64, len: i64, text: &str, version: u64) -> Operation {
	Operation { kind: OpKind::Insert, index, len, text: text.as_bytes().to_vec(), version }
}

async fn seeded(id: &str, text: &[u8]) -> (Arc<StorageGateway>, Registry) {
	let storage = StorageGateway::in_memory(Duration::from_secs(5)).await.unwrap();
	storage
		.write_metadata(&DocumentMeta { id: id.to_string(), name: "n".into(), author: "a".into() })
		.await
		.unwrap();
	storage.write_text(id, text).await.unwrap();
	let storage = Arc::new(storage);
	(storage.clone(), Registry::new(storage))
}

#[tokio::test]
async fn s1_sequential_insert() {
	let (storage, registry) = seeded("d1", b"").await;
	let handle = registry.handle_for(&"d1".to_string()).await.unwrap();

	let (_op, version) = handle.accept(&storage, insert(0, 5, "hello", 0)).await.unwrap();
	assert_eq!(version, 1);
	assert_eq!(handle.current_text().await, b"hello");
}

#[tokio::test]
async fn s2_concurrent_insert_at_same_index() {
	let (storage, registry) = seeded("d2", b"AC").await;
	let handle = registry.handle_for(&"d2".to_string()).await.unwrap();

	let (a, v1) = handle.accept(&storage, insert(1, 1, "X", 0)).await.unwrap();
	assert_eq!(v1, 1);
	assert_eq!(a.index, 1);
	assert_eq!(handle.current_text().await, b"AXC");

	let (b, v2) = handle.accept(&storage, insert(1, 1, "Y", 0)).await.unwrap();
	assert_eq!(v2, 2);
	assert_eq!(b.index, 2);
	assert_eq!(handle.current_text().await, b"AXYC");
}

#[tokio::test]
async fn s3_concurrent_insert_before_existing_op() {
	let (storage, registry) = seeded("d3", b"AC").await;
	let handle = registry.handle_for(&"d3".to_string()).await.unwrap();

	let (a, v1) = handle.accept(&storage, insert(0, 1, "Z", 0)).await.unwrap();
	assert_eq!(v1, 1);
	assert_eq!(a.index, 0);
	assert_eq!(handle.current_text().await, b"ZAC");

	let (b, v2) = handle.accept(&storage, insert(1, 1, "Y", 0)).await.unwrap();
	assert_eq!(v2, 2);
	assert_eq!(b.index, 2);
	assert_eq!(handle.current_text().await, b"ZAYC");
}

/// S5: a storage failure mid-accept must leave the document exactly as it
/// was. Simulated here by pointing the gateway at a document id it was
/// never seeded for, so `write_text` has nothing to overwrite and instead
/// the in-memory handle is seeded directly and the storage handle is swapped
/// out for one that cannot satisfy the write.
#[tokio::test]
async fn s5_storage_failure_leaves_log_and_text_untouched() {
	let (_storage, registry) = seeded("d5", b"abc").await;
	let handle = registry.handle_for(&"d5".to_string()).await.unwrap();

	// A gateway with a deadline of zero times out on every call, standing
	// in for "write_text fails after apply".
	let failing_storage = StorageGateway::in_memory(Duration::from_millis(0)).await.unwrap();

	let before = handle.current_text().await;
	let before_version = handle.last_version().await;

	let err = handle.accept(&failing_storage, insert(3, 1, "d", 0)).await.unwrap_err();
	assert!(matches!(err, Error::Storage(_)));

	assert_eq!(handle.current_text().await, before);
	assert_eq!(handle.last_version().await, before_version);

	// The document accepts a later, well-formed operation as if the failed
	// one never happened.
	let real_storage = StorageGateway::in_memory(Duration::from_secs(5)).await.unwrap();
	real_storage
		.write_metadata(&DocumentMeta { id: "d5".into(), name: "n".into(), author: "a".into() })
		.await
		.unwrap();
	let (_op, version) = handle.accept(&real_storage, insert(3, 1, "d", 0)).await.unwrap();
	assert_eq!(version, before_version + 1);
	assert_eq!(handle.current_text().await, b"abcd");
}

/// Replaying the accepted log from the initial text reproduces the final
/// stored text (§8: replay invariant).
#[tokio::test]
async fn replaying_the_log_reproduces_the_stored_text() {
	let (storage, registry) = seeded("d-replay", b"AC").await;
	let handle = registry.handle_for(&"d-replay".to_string()).await.unwrap();

	handle.accept(&storage, insert(1, 1, "X", 0)).await.unwrap();
	handle.accept(&storage, insert(1, 1, "Y", 0)).await.unwrap();
	handle.accept(&storage, insert(0, 1, "Q", 2)).await.unwrap();

	let stored = storage.read_text(&"d-replay".to_string()).await.unwrap();
	assert_eq!(stored, handle.current_text().await);
}

/// Convergence (§8): whichever order the server happens to accept two
/// concurrent siblings in, every participant ends up looking at the same
/// text, because they all replay the same server-decided log rather than
/// re-deriving it locally. Two independently-seeded handles that each
/// process the operations in the *same* arrival order must land on
/// identical text.
#[tokio::test]
async fn replicas_applying_the_same_accepted_order_converge() {
	let (storage_1, registry_1) = seeded("conv-1", b"AC").await;
	let handle_1 = registry_1.handle_for(&"conv-1".to_string()).await.unwrap();
	let (a1, _) = handle_1.accept(&storage_1, insert(1, 1, "X", 0)).await.unwrap();
	let (b1, _) = handle_1.accept(&storage_1, insert(1, 1, "Y", 0)).await.unwrap();

	let (storage_2, registry_2) = seeded("conv-2", b"AC").await;
	let handle_2 = registry_2.handle_for(&"conv-2".to_string()).await.unwrap();
	let (_, v) = handle_2.accept(&storage_2, a1.clone()).await.unwrap();
	// b1 is already reconciled against a1; replay it as an op that already
	// saw the log up to `v`, so it isn't transformed a second time.
	let b1_replay = Operation { version: v, ..b1.clone() };
	handle_2.accept(&storage_2, b1_replay).await.unwrap();

	assert_eq!(handle_1.current_text().await, handle_2.current_text().await);
}
