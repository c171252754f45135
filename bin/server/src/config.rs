// Copyright (c) cloudocs.dev 2026
// This file is licensed under the Apache-2.0

use std::time::Duration;

/// Process configuration (§2 item 10). Defaults match §6; every field is
/// overridable via environment variable so the source's single hardcoded
/// listen address doesn't survive into this implementation (§9).
#[derive(Debug, Clone)]
pub struct ServerConfig {
	pub listen_addr: String,
	pub sqlite_path: String,
	pub storage_deadline: Duration,
	pub outbound_queue_capacity: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			listen_addr: "0.0.0.0:8080".to_string(),
			sqlite_path: "cloudocs.sqlite3".to_string(),
			storage_deadline: cloudocs_storage::DEFAULT_DEADLINE,
			outbound_queue_capacity: 32,
		}
	}
}

impl ServerConfig {
	/// Loads overrides from the environment, falling back to defaults for
	/// anything unset or unparsable.
	pub fn from_env() -> Self {
		let mut config = Self::default();

		if let Ok(addr) = std::env::var("CLOUDOCS_LISTEN_ADDR") {
			config.listen_addr = addr;
		}
		if let Ok(path) = std::env::var("CLOUDOCS_SQLITE_PATH") {
			config.sqlite_path = path;
		}
		if let Ok(secs) = std::env::var("CLOUDOCS_STORAGE_DEADLINE_SECS") {
			if let Ok(secs) = secs.parse::<u64>() {
				config.storage_deadline = Duration::from_secs(secs);
			}
		}
		if let Ok(capacity) = std::env::var("CLOUDOCS_OUTBOUND_QUEUE_CAPACITY") {
			if let Ok(capacity) = capacity.parse::<usize>() {
				config.outbound_queue_capacity = capacity;
			}
		}

		config
	}
}
