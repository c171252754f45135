// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("document not found")]
	NotFound,

	#[error("unauthorized")]
	Unauthorized,

	#[error(transparent)]
	Storage(#[from] cloudocs_storage::Error),

	#[error(transparent)]
	Engine(#[from] cloudocs_engine::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
	fn into_response(self) -> Response {
		let status = match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::Unauthorized => StatusCode::UNAUTHORIZED,
			Error::Storage(cloudocs_storage::Error::NotFound) => StatusCode::NOT_FOUND,
			Error::Storage(_) | Error::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
		};
		status.into_response()
	}
}
