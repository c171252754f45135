// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("malformed JSON: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
