// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use cloudocs_core::DocumentMeta;
use tracing::instrument;
use uuid::Uuid;

use crate::dto::{AuthRequest, AuthResponse, CreateDocumentRequest, DocumentDto};
use crate::error::{Error, Result};
use crate::state::AppState;

const CLIENT_ID_HEADER: &str = "x-cloudocs-id";

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn auth(State(state): State<AppState>, Json(body): Json<AuthRequest>) -> Result<Json<AuthResponse>> {
	let user = state.storage.read_user(&body.username).await?.ok_or(Error::Unauthorized)?;
	if user.password != body.password {
		return Err(Error::Unauthorized);
	}
	Ok(Json(AuthResponse { user_id: user.user_id }))
}

#[instrument(skip(state))]
pub async fn list_documents(State(state): State<AppState>) -> Result<Json<Vec<DocumentDto>>> {
	let docs = state.storage.list_documents().await?;
	Ok(Json(docs.into_iter().map(DocumentDto::from).collect()))
}

#[instrument(skip(state, body), fields(name = %body.name))]
pub async fn create_document(State(state): State<AppState>, Json(body): Json<CreateDocumentRequest>) -> Result<Json<DocumentDto>> {
	let author = if body.author.is_empty() { "anonymous".to_string() } else { body.author };
	let id = Uuid::new_v4().to_string();
	let meta = DocumentMeta { id: id.clone(), name: body.name, author };

	state.storage.write_metadata(&meta).await?;
	if let Err(err) = state.storage.write_text(&id, b"start typing").await {
		let _ = state.storage.delete(&id).await;
		return Err(err.into());
	}

	Ok(Json(DocumentDto::from(meta)))
}

#[instrument(skip(state))]
pub async fn delete_document(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
	if !state.storage.exists(&id).await? {
		return Err(Error::NotFound);
	}
	state.storage.delete(&id).await?;
	Ok(StatusCode::OK)
}

#[instrument(skip(state, ws, headers), fields(document = %id))]
pub async fn open_document(
	State(state): State<AppState>,
	Path(id): Path<String>,
	headers: HeaderMap,
	ws: WebSocketUpgrade,
) -> Response {
	match authorize_upgrade(&state, &id, &headers).await {
		Ok(client_id) => ws.on_upgrade(move |socket| async move {
			cloudocs_server_ws::handle_connection(socket, id, client_id, state.registry, state.hub).await
		}),
		Err(err) => err.into_response(),
	}
}

async fn authorize_upgrade(state: &AppState, doc_id: &str, headers: &HeaderMap) -> Result<String> {
	if !state.registry.exists(&doc_id.to_string()).await? {
		return Err(Error::NotFound);
	}
	let client_id = headers
		.get(CLIENT_ID_HEADER)
		.and_then(|value| value.to_str().ok())
		.filter(|value| !value.is_empty())
		.ok_or(Error::Unauthorized)?;
	Ok(client_id.to_string())
}
