// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error(transparent)]
	Engine(#[from] cloudocs_engine::Error),

	#[error(transparent)]
	Wire(#[from] cloudocs_wire::Error),

	/// The client's own outbound queue was full when we tried to enqueue its
	/// ack. Per the broadcast back-pressure policy (§4.4/§9), a client whose
	/// queue can't absorb a frame is disconnected rather than left to desync.
	#[error("client's outbound queue is full")]
	Disconnected,
}

pub type Result<T> = std::result::Result<T, Error>;
