// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use cloudocs_core::DocumentMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthRequest {
	pub username: String,
	pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
	pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateDocumentRequest {
	pub name: String,
	#[serde(default)]
	pub author: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentDto {
	#[serde(rename = "ID")]
	pub id: String,
	pub name: String,
	pub author: String,
}

impl From<DocumentMeta> for DocumentDto {
	fn from(meta: DocumentMeta) -> Self {
		Self { id: meta.id, name: meta.name, author: meta.author }
	}
}
