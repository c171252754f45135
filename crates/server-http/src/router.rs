// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the full HTTP router (§6): CRUD/auth boundary stubs plus the
/// websocket upgrade route that hands off to the Connection Handler.
pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/api/v1/auth", post(handlers::auth))
		.route("/api/v1/documents", get(handlers::list_documents))
		.route("/api/v1/documents/create", post(handlers::create_document))
		.route("/api/v1/documents/{id}", delete(handlers::delete_document).get(handlers::open_document))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}
