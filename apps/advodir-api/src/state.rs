use std::sync::Arc;

use advodir_service::DirectoryService;
use advodir_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<DirectoryService>,
}
impl AppState {
	pub async fn new(config: advodir_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		Ok(Self::from_service(DirectoryService::new(&config, db)))
	}

	pub fn from_service(service: DirectoryService) -> Self {
		Self { service: Arc::new(service) }
	}
}
