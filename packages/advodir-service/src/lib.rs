pub mod search;

mod error;

pub use advodir_domain::{Advocate, AdvocatePage, PageLimits, PageQuery, RawPageParams};
pub use error::{Error, Result};

use advodir_config::Config;
use advodir_storage::db::Db;

/// Read-only directory queries over an injected database handle.
pub struct DirectoryService {
	pub db: Db,
	pub limits: PageLimits,
}
impl DirectoryService {
	pub fn new(config: &Config, db: Db) -> Self {
		let limits = PageLimits {
			default_limit: config.directory.default_limit,
			max_limit: config.directory.max_limit,
		};

		Self { db, limits }
	}

	pub async fn shutdown(&self) {
		self.db.close().await;
	}
}
