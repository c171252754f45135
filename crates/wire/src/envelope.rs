// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::error::Result;

/// The three event kinds carried by the wire envelope. Unlike the payload
/// structs, this is not derived via serde directly on [`Event`] — an
/// unrecognized `type` string must decode successfully so the caller can log
/// and ignore it (§4.2), rather than fail the whole frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
	Init,
	Operation,
	OperationAck,
}

impl EventType {
	pub fn as_str(self) -> &'static str {
		match self {
			EventType::Init => "INIT",
			EventType::Operation => "OPERATION",
			EventType::OperationAck => "OPERATION_ACK",
		}
	}

	pub fn parse(s: &str) -> Option<Self> {
		match s {
			"INIT" => Some(EventType::Init),
			"OPERATION" => Some(EventType::Operation),
			"OPERATION_ACK" => Some(EventType::OperationAck),
			_ => None,
		}
	}
}

/// The envelope every frame is wrapped in. `event` holds the JSON-encoded
/// payload as a string, not as nested JSON, matching the wire format in §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Event {
	#[serde(rename = "type")]
	pub kind: String,
	pub event: String,
}

/// Encodes `payload` as the JSON-string-embedded body of an [`Event`] of the
/// given `kind`.
pub fn encode_event(kind: EventType, payload: &impl Serialize) -> Result<Event> {
	let event = serde_json::to_string(payload)?;
	Ok(Event { kind: kind.as_str().to_string(), event })
}

/// Serializes an [`Event`] to the bytes sent on the transport frame.
pub fn encode_frame(event: &Event) -> Result<String> {
	Ok(serde_json::to_string(event)?)
}

/// Decodes a transport frame into an [`Event`]. Does not interpret `kind` —
/// the caller dispatches on [`EventType::parse`].
pub fn decode_frame(frame: &str) -> Result<Event> {
	Ok(serde_json::from_str(frame)?)
}

/// Decodes the JSON-string payload carried by `event` into `T`.
pub fn decode_payload<T: DeserializeOwned>(event: &Event) -> Result<T> {
	Ok(serde_json::from_str(&event.event)?)
}
