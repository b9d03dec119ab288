use std::time::Duration;

use reqwest::Client;

use advodir_domain::{AdvocatePage, PageQuery};

use crate::Result;

#[derive(Clone, Debug)]
pub struct ApiClient {
	http: Client,
	base_url: String,
}
impl ApiClient {
	pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
		let http = Client::builder().timeout(timeout).build()?;

		Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
	}

	/// `GET /api/advocates` for `query`. Non-2xx statuses are errors; nothing is retried.
	pub async fn fetch_page(&self, query: &PageQuery) -> Result<AdvocatePage> {
		let url = format!("{}/api/advocates", self.base_url);
		let res = self.http.get(url).query(&query.to_query_pairs()).send().await?;
		let page = res.error_for_status()?.json().await?;

		Ok(page)
	}
}
