// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

mod config;

use std::process::ExitCode;
use std::sync::Arc;

use cloudocs_engine::Registry;
use cloudocs_hub::SessionHub;
use cloudocs_server_http::{router, AppState};
use cloudocs_storage::StorageGateway;
use config::ServerConfig;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let config = ServerConfig::from_env();

	let storage = match StorageGateway::open(&config.sqlite_path, config.storage_deadline).await {
		Ok(storage) => Arc::new(storage),
		Err(err) => {
			error!(error = %err, path = %config.sqlite_path, "failed to open storage");
			return ExitCode::FAILURE;
		}
	};

	let state = AppState {
		storage: storage.clone(),
		registry: Arc::new(Registry::new(storage)),
		hub: Arc::new(SessionHub::new(config.outbound_queue_capacity)),
	};

	let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
		Ok(listener) => listener,
		Err(err) => {
			error!(error = %err, addr = %config.listen_addr, "failed to bind listen address");
			return ExitCode::FAILURE;
		}
	};

	info!(addr = %config.listen_addr, "cloudocs listening");
	if let Err(err) = axum::serve(listener, router(state)).await {
		error!(error = %err, "server exited with an error");
		return ExitCode::FAILURE;
	}

	ExitCode::SUCCESS
}
