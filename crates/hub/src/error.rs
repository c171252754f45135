// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	#[error("client {0} is already joined to this document")]
	AlreadyJoined(String),
}

pub type Result<T> = std::result::Result<T, Error>;
