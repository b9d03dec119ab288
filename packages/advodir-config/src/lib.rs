mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Directory, Postgres, Service, Storage};

use std::{env, fs, path::Path};

pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

pub fn load(path: &Path) -> Result<Config> {
	let database_url = env::var(DATABASE_URL_ENV).ok();

	load_with_database_url(path, database_url.as_deref())
}

/// Same as [`load`], with the `DATABASE_URL` fallback passed in explicitly.
pub fn load_with_database_url(path: &Path, database_url: Option<&str>) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg, database_url);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: format!(
				"storage.postgres.dsn must be set, or {DATABASE_URL_ENV} must be provided."
			),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.acquire_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.acquire_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.directory.default_limit == 0 {
		return Err(Error::Validation {
			message: "directory.default_limit must be greater than zero.".to_string(),
		});
	}
	if cfg.directory.max_limit.is_some_and(|max_limit| max_limit < cfg.directory.default_limit) {
		return Err(Error::Validation {
			message: "directory.max_limit must be greater than or equal to directory.default_limit."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config, database_url: Option<&str>) {
	let dsn = cfg.storage.postgres.dsn.trim();

	if dsn.is_empty() {
		cfg.storage.postgres.dsn =
			database_url.map(|url| url.trim().to_string()).unwrap_or_default();
	} else if dsn.len() != cfg.storage.postgres.dsn.len() {
		cfg.storage.postgres.dsn = dsn.to_string();
	}
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
