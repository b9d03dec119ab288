use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	#[serde(default)]
	pub directory: Directory,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	/// Optional in the file. An empty value falls back to the `DATABASE_URL` environment variable.
	#[serde(default)]
	pub dsn: String,
	pub pool_max_conns: u32,
	#[serde(default = "default_acquire_timeout_ms")]
	pub acquire_timeout_ms: u64,
}

/// Page sizing applied to `GET /api/advocates`.
#[derive(Debug, Deserialize)]
pub struct Directory {
	#[serde(default = "default_limit")]
	pub default_limit: u32,
	/// Optional upper bound on `limit`. When unset, a positive `limit` is honored as requested.
	#[serde(default)]
	pub max_limit: Option<u32>,
}
impl Default for Directory {
	fn default() -> Self {
		Self { default_limit: default_limit(), max_limit: None }
	}
}

fn default_acquire_timeout_ms() -> u64 {
	5_000
}

fn default_limit() -> u32 {
	25
}
