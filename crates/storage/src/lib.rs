// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The Storage Gateway (§4.1): the only component that touches the embedded
//! key-value store. Backed by a local SQLite file used purely as a
//! key/value table — two tables, no relational schema exposed to callers.
//!
//! SQLite access is synchronous; every call runs on `tokio-rusqlite`'s
//! dedicated connection worker and is bounded by a deadline so a stalled
//! disk cannot wedge the async reactor.

mod error;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use rusqlite::{OptionalExtension, params};
use tokio_rusqlite::Connection;
use tracing::instrument;

use cloudocs_core::{DocumentId, DocumentMeta};

pub use error::{Error, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
	id     TEXT PRIMARY KEY,
	name   TEXT NOT NULL,
	author TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS texts (
	id   TEXT PRIMARY KEY,
	text BLOB NOT NULL
);
CREATE TABLE IF NOT EXISTS users (
	username TEXT PRIMARY KEY,
	user_id  TEXT NOT NULL,
	password TEXT NOT NULL
);
";

/// A row from the `users` table, mirroring the source's `users.<username>`
/// hash. The password is stored and compared in plaintext, matching the
/// source exactly — real credential handling is out of scope (§1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
	pub user_id: String,
	pub username: String,
	pub password: String,
}

/// Default deadline applied to every gateway call, per §4.1 ("≤5 s").
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct StorageGateway {
	conn: Arc<Connection>,
	deadline: Duration,
}

impl StorageGateway {
	/// Opens (creating if necessary) the SQLite file at `path`.
	pub async fn open(path: impl AsRef<Path>, deadline: Duration) -> Result<Self> {
		let conn = Connection::open(path).await?;
		conn.call(|conn| Ok(conn.execute_batch(SCHEMA)?)).await?;
		Ok(Self { conn: Arc::new(conn), deadline })
	}

	/// An in-memory gateway, handy for tests and the `db` exercised by
	/// `on_create` hooks.
	pub async fn in_memory(deadline: Duration) -> Result<Self> {
		let conn = Connection::open_in_memory().await?;
		conn.call(|conn| Ok(conn.execute_batch(SCHEMA)?)).await?;
		Ok(Self { conn: Arc::new(conn), deadline })
	}

	async fn run<F, T>(&self, f: F) -> Result<T>
	where
		F: FnOnce(&mut rusqlite::Connection) -> std::result::Result<T, tokio_rusqlite::Error> + Send + 'static,
		T: Send + 'static,
	{
		match tokio::time::timeout(self.deadline, self.conn.call(f)).await {
			Ok(result) => Ok(result?),
			Err(_) => Err(Error::Timeout),
		}
	}

	#[instrument(skip(self), err)]
	pub async fn exists(&self, doc_id: &DocumentId) -> Result<bool> {
		let doc_id = doc_id.clone();
		self.run(move |conn| {
			let exists = conn
				.query_row("SELECT 1 FROM documents WHERE id = ?1", params![doc_id], |_| Ok(()))
				.optional()?
				.is_some();
			Ok(exists)
		})
		.await
	}

	#[instrument(skip(self), err)]
	pub async fn read_metadata(&self, doc_id: &DocumentId) -> Result<DocumentMeta> {
		let id = doc_id.clone();
		let row = self
			.run(move |conn| {
				let row = conn
					.query_row(
						"SELECT id, name, author FROM documents WHERE id = ?1",
						params![id],
						|row| {
							Ok(DocumentMeta {
								id: row.get(0)?,
								name: row.get(1)?,
								author: row.get(2)?,
							})
						},
					)
					.optional()?;
				Ok(row)
			})
			.await?;
		row.ok_or(Error::NotFound)
	}

	#[instrument(skip(self, meta), err)]
	pub async fn write_metadata(&self, meta: &DocumentMeta) -> Result<()> {
		let meta = meta.clone();
		self.run(move |conn| {
			conn.execute(
				"INSERT INTO documents (id, name, author) VALUES (?1, ?2, ?3)
				 ON CONFLICT(id) DO UPDATE SET name = excluded.name, author = excluded.author",
				params![meta.id, meta.name, meta.author],
			)?;
			Ok(())
		})
		.await
	}

	#[instrument(skip(self), err)]
	pub async fn read_text(&self, doc_id: &DocumentId) -> Result<Vec<u8>> {
		let id = doc_id.clone();
		let row = self
			.run(move |conn| {
				let row = conn
					.query_row("SELECT text FROM texts WHERE id = ?1", params![id], |row| row.get(0))
					.optional()?;
				Ok(row)
			})
			.await?;
		row.ok_or(Error::NotFound)
	}

	#[instrument(skip(self, text), err)]
	pub async fn write_text(&self, doc_id: &DocumentId, text: &[u8]) -> Result<()> {
		let id = doc_id.clone();
		let text = text.to_vec();
		self.run(move |conn| {
			conn.execute(
				"INSERT INTO texts (id, text) VALUES (?1, ?2)
				 ON CONFLICT(id) DO UPDATE SET text = excluded.text",
				params![id, text],
			)?;
			Ok(())
		})
		.await
	}

	#[instrument(skip(self), err)]
	pub async fn delete(&self, doc_id: &DocumentId) -> Result<()> {
		let id = doc_id.clone();
		self.run(move |conn| {
			conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
			conn.execute("DELETE FROM texts WHERE id = ?1", params![id])?;
			Ok(())
		})
		.await
	}

	/// Every document's metadata, for the `GET /api/v1/documents` boundary
	/// stub. Unordered — mirrors the source's unordered key scan.
	#[instrument(skip(self), err)]
	pub async fn list_documents(&self) -> Result<Vec<DocumentMeta>> {
		self.run(|conn| {
			let mut stmt = conn.prepare("SELECT id, name, author FROM documents")?;
			let rows = stmt.query_map([], |row| {
				Ok(DocumentMeta { id: row.get(0)?, name: row.get(1)?, author: row.get(2)? })
			})?;
			let docs: rusqlite::Result<Vec<DocumentMeta>> = rows.collect();
			Ok(docs?)
		})
		.await
	}

	/// Looks up a `users.<username>` row for the auth boundary stub.
	#[instrument(skip(self), err)]
	pub async fn read_user(&self, username: &str) -> Result<Option<UserRecord>> {
		let username = username.to_string();
		self.run(move |conn| {
			let row = conn
				.query_row(
					"SELECT user_id, username, password FROM users WHERE username = ?1",
					params![username],
					|row| Ok(UserRecord { user_id: row.get(0)?, username: row.get(1)?, password: row.get(2)? }),
				)
				.optional()?;
			Ok(row)
		})
		.await
	}

	/// Seeds or updates a user's credentials. Not reachable from any HTTP
	/// route (there is no signup endpoint in scope) — exists so operators
	/// and tests can provision accounts directly.
	#[instrument(skip(self, password), err)]
	pub async fn write_user(&self, user_id: &str, username: &str, password: &str) -> Result<()> {
		let (user_id, username, password) = (user_id.to_string(), username.to_string(), password.to_string());
		self.run(move |conn| {
			conn.execute(
				"INSERT INTO users (username, user_id, password) VALUES (?1, ?2, ?3)
				 ON CONFLICT(username) DO UPDATE SET user_id = excluded.user_id, password = excluded.password",
				params![username, user_id, password],
			)?;
			Ok(())
		})
		.await
	}
}
