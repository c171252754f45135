// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("document not found")]
	NotFound,

	#[error("storage operation exceeded its deadline")]
	Timeout,

	#[error("storage I/O error: {0}")]
	Io(#[from] tokio_rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
