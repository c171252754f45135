// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The Connection Handler (§4.5): the glue between a websocket upgrade and
//! the Session Hub / Operation Log. Owns one connection end to end —
//! initial snapshot, read loop, write loop, teardown.

mod error;

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use cloudocs_core::{ClientId, DocumentId};
use cloudocs_engine::Registry;
use cloudocs_hub::SessionHub;
use cloudocs_wire::{EventType, Init, OperationAck, decode_frame, decode_payload, encode_event, encode_frame};
use futures_util::{SinkExt, StreamExt};
use tracing::{info, instrument, warn};

pub use error::{Error, Result};

/// Drives one client's connection from just after websocket upgrade to
/// teardown. Blocks until the connection closes or a transport error
/// occurs; never returns an error itself (§7: transport failures terminate
/// only this connection, not the caller).
#[instrument(skip(socket, registry, hub), fields(document = %doc_id, client = %client_id))]
pub async fn handle_connection(
	socket: WebSocket,
	doc_id: DocumentId,
	client_id: ClientId,
	registry: Arc<Registry>,
	hub: Arc<SessionHub>,
) {
	let (mut sink, mut stream) = socket.split();

	let (self_tx, mut self_rx) = match setup(&doc_id, &client_id, &registry, &hub, &mut sink).await {
		Ok(channels) => channels,
		Err(err) => {
			warn!(error = %err, "failed to initialize connection");
			return;
		}
	};

	let writer = tokio::spawn(async move {
		while let Some(event) = self_rx.recv().await {
			match encode_frame(&event) {
				Ok(frame) => {
					if sink.send(Message::Text(frame.into())).await.is_err() {
						break;
					}
				}
				Err(err) => warn!(error = %err, "failed to encode outgoing frame"),
			}
		}
	});

	while let Some(message) = stream.next().await {
		let message = match message {
			Ok(message) => message,
			Err(err) => {
				warn!(error = %err, "transport read error, closing connection");
				break;
			}
		};
		let Message::Text(text) = message else { continue };

		match handle_frame(text.as_str(), &doc_id, &client_id, &registry, &hub, &self_tx).await {
			Ok(()) => {}
			Err(Error::Disconnected) => {
				warn!("client's outbound queue is full, disconnecting");
				break;
			}
			Err(err) => warn!(error = %err, "dropping malformed frame"),
		}
	}

	hub.leave(&doc_id, &client_id);
	writer.abort();
	info!("connection closed");
}

type SelfChannel = (tokio::sync::mpsc::Sender<cloudocs_wire::Event>, tokio::sync::mpsc::Receiver<cloudocs_wire::Event>);

async fn setup(
	doc_id: &DocumentId,
	client_id: &ClientId,
	registry: &Registry,
	hub: &SessionHub,
	sink: &mut (impl futures_util::Sink<Message, Error = axum::Error> + Unpin),
) -> Result<SelfChannel> {
	let handle = registry.handle_for(doc_id).await?;
	let metadata = registry.storage().read_metadata(doc_id).await.map_err(cloudocs_engine::Error::from)?;
	let text = handle.current_text().await;
	let last_version = handle.last_version().await;

	let init = Init { document_name: metadata.name, text: String::from_utf8_lossy(&text).into_owned(), last_version };
	let event = encode_event(EventType::Init, &init)?;
	let frame = encode_frame(&event)?;
	let _ = sink.send(Message::Text(frame.into())).await;

	let (tx, rx) = hub
		.join(doc_id, client_id.clone())
		.unwrap_or_else(|_| hub_rejoin(hub, doc_id, client_id));
	Ok((tx, rx))
}

/// `join` rejects a duplicate client id; a reconnect under the same id
/// replaces the stale entry rather than refusing the new connection.
fn hub_rejoin(hub: &SessionHub, doc_id: &DocumentId, client_id: &ClientId) -> SelfChannel {
	hub.leave(doc_id, client_id);
	hub.join(doc_id, client_id.clone()).expect("just vacated this client id")
}

#[instrument(skip(frame, registry, hub, self_tx), fields(document = %doc_id, client = %client_id))]
async fn handle_frame(
	frame: &str,
	doc_id: &DocumentId,
	client_id: &ClientId,
	registry: &Registry,
	hub: &SessionHub,
	self_tx: &tokio::sync::mpsc::Sender<cloudocs_wire::Event>,
) -> Result<()> {
	let envelope = decode_frame(frame)?;
	let Some(kind) = EventType::parse(&envelope.kind) else {
		warn!(kind = %envelope.kind, "ignoring unrecognized event type");
		return Ok(());
	};
	if kind != EventType::Operation {
		return Ok(());
	}

	let payload: cloudocs_wire::Operation = decode_payload(&envelope)?;
	let op = payload.into();

	let handle = registry.handle_for(doc_id).await?;
	let (accepted, last_version) = match handle.accept(registry.storage(), op).await {
		Ok(result) => result,
		Err(err) => {
			warn!(error = %err, "rejecting invalid or unreconcilable operation");
			return Ok(());
		}
	};

	let ack = encode_event(EventType::OperationAck, &OperationAck { last_version })?;
	if self_tx.try_send(ack).is_err() {
		return Err(Error::Disconnected);
	}

	let broadcast = encode_event(EventType::Operation, &cloudocs_wire::Operation::from(&accepted))?;
	hub.broadcast(doc_id, broadcast, client_id);

	Ok(())
}
