// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use std::sync::Arc;

use cloudocs_engine::Registry;
use cloudocs_hub::SessionHub;
use cloudocs_storage::StorageGateway;

#[derive(Clone)]
pub struct AppState {
	pub storage: Arc<StorageGateway>,
	pub registry: Arc<Registry>,
	pub hub: Arc<SessionHub>,
}
