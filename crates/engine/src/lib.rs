// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! Operation Log, Text State, and per-document registry (§4.2-§4.3):
//! reconciles concurrent edits against a document's history and keeps the
//! durable text in sync with the in-memory replay.

mod apply;
mod error;
mod registry;

pub use apply::apply_operation;
pub use error::{Error, Result};
pub use registry::{DocumentHandle, Registry};
