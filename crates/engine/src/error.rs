// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("invalid operation: {0}")]
	InvalidOperation(String),

	#[error(transparent)]
	Storage(#[from] cloudocs_storage::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
