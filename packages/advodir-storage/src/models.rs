use sqlx::types::Json;
use time::OffsetDateTime;

#[derive(Debug, sqlx::FromRow)]
pub struct AdvocateRow {
	pub id: i32,
	pub first_name: String,
	pub last_name: String,
	pub city: String,
	pub degree: String,
	pub specialties: Json<Vec<String>>,
	pub years_of_experience: i32,
	pub phone_number: i64,
	pub created_at: OffsetDateTime,
}

/// A matching page and the total number of rows the same predicate matches.
#[derive(Debug)]
pub struct AdvocateSlice {
	pub rows: Vec<AdvocateRow>,
	pub total: i64,
}
