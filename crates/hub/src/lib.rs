// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The Session Hub (§4.4): per-document membership and broadcast fan-out.
//! Membership changes and broadcast traversal run over a `DashMap` so they
//! never block each other; each client's outbound path is a bounded
//! `mpsc` channel so one slow peer can't stall the rest of the room.

mod error;

use cloudocs_core::{ClientId, DocumentId};
use cloudocs_wire::Event;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::mpsc;
use tracing::{instrument, warn};

pub use error::{Error, Result};

type Room = DashMap<ClientId, mpsc::Sender<Event>>;

pub struct SessionHub {
	capacity: usize,
	rooms: DashMap<DocumentId, Room>,
}

impl SessionHub {
	pub fn new(capacity: usize) -> Self {
		Self { capacity, rooms: DashMap::new() }
	}

	/// Registers `client` as a live participant of `doc`. Returns a clone of
	/// the sending half (so the caller can enqueue its own direct replies,
	/// e.g. an `OPERATION_ACK`) alongside the receiving half that a writer
	/// task should drain — both ends of the *same* channel, so acks and
	/// broadcasts to this client are delivered in one serialized order.
	#[instrument(skip(self), fields(document = %doc, client = %client), err)]
	pub fn join(&self, doc: &DocumentId, client: ClientId) -> Result<(mpsc::Sender<Event>, mpsc::Receiver<Event>)> {
		let room = self.rooms.entry(doc.clone()).or_insert_with(DashMap::new);
		match room.entry(client.clone()) {
			Entry::Occupied(_) => Err(Error::AlreadyJoined(client)),
			Entry::Vacant(entry) => {
				let (tx, rx) = mpsc::channel(self.capacity);
				entry.insert(tx.clone());
				Ok((tx, rx))
			}
		}
	}

	/// Deregisters `client` from `doc`. If it was the last participant, the
	/// room itself is dropped.
	#[instrument(skip(self), fields(document = %doc, client = %client))]
	pub fn leave(&self, doc: &DocumentId, client: &ClientId) {
		if let Some(room) = self.rooms.get(doc) {
			room.remove(client);
			if room.is_empty() {
				drop(room);
				self.rooms.remove_if(doc, |_, room| room.is_empty());
			}
		}
	}

	/// Enqueues `event` for delivery to every participant of `doc` other
	/// than `except`. A participant whose queue is full or whose receiver
	/// has been dropped is disconnected rather than allowed to stall the
	/// rest of the room (§4.4, §9 back-pressure policy).
	#[instrument(skip(self, event), fields(document = %doc, except = %except))]
	pub fn broadcast(&self, doc: &DocumentId, event: Event, except: &ClientId) {
		let Some(room) = self.rooms.get(doc) else { return };

		let mut dead = Vec::new();
		for entry in room.iter() {
			let client = entry.key();
			if client == except {
				continue;
			}
			if let Err(err) = entry.value().try_send(event.clone()) {
				warn!(client = %client, error = %err, "dropping slow or disconnected client");
				dead.push(client.clone());
			}
		}
		drop(room);

		for client in dead {
			self.leave(doc, &client);
		}
	}

	/// Number of participants currently registered for `doc`.
	pub fn member_count(&self, doc: &DocumentId) -> usize {
		self.rooms.get(doc).map(|room| room.len()).unwrap_or(0)
	}
}
