pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<advodir_storage::Error> for Error {
	fn from(err: advodir_storage::Error) -> Self {
		match err {
			advodir_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
		}
	}
}
