// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The JSON wire codec: the `Event` envelope and its `Init` / `Operation` /
//! `OperationAck` payloads (§4.2, §6). Unknown fields are rejected; unknown
//! event `type`s decode fine at the envelope level and are left for the
//! caller to log and ignore.

mod envelope;
mod error;
mod payload;

pub use envelope::{EventType, Event, decode_frame, decode_payload, encode_event, encode_frame};
pub use error::{Error, Result};
pub use payload::{Init, OpType, Operation, OperationAck};
