// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

//! The HTTP boundary (§2 item 11, §6): document CRUD and auth stubs, plus
//! the router wiring that hands the websocket upgrade route off to
//! `cloudocs-server-ws`. None of this is the collaborative-editing core —
//! it exists so the core has documents and sessions to attach to.

mod dto;
mod error;
mod handlers;
mod router;
mod state;

pub use dto::{AuthRequest, AuthResponse, CreateDocumentRequest, DocumentDto};
pub use error::{Error, Result};
pub use router::router;
pub use state::AppState;
