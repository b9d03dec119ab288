use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One directory record as it travels over `GET /api/advocates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advocate {
	pub id: i32,
	pub first_name: String,
	pub last_name: String,
	pub city: String,
	pub degree: String,
	pub specialties: Vec<String>,
	pub years_of_experience: i32,
	pub phone_number: i64,
	#[serde(with = "crate::time_serde")]
	pub created_at: OffsetDateTime,
}

/// Response body: one page of matches plus the unpaginated match count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvocatePage {
	pub data: Vec<Advocate>,
	pub total: u64,
}
