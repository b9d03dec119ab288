pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Directory API request failed: {0}")]
	Http(#[from] reqwest::Error),
}
