use sqlx::{Postgres, QueryBuilder};

use crate::{
	Result,
	db::Db,
	filter::AdvocateFilter,
	models::{AdvocateRow, AdvocateSlice},
};

const ADVOCATE_COLUMNS: &str = "\
SELECT id, first_name, last_name, city, degree, specialties, years_of_experience, phone_number, created_at
FROM advocates";

/// Runs the count and page queries for `filter` concurrently. Rows are ordered by `id` ascending.
pub async fn search_advocates(
	db: &Db,
	filter: &AdvocateFilter,
	limit: i64,
	offset: i64,
) -> Result<AdvocateSlice> {
	let mut count_query = QueryBuilder::<Postgres>::new("SELECT count(*) FROM advocates");

	filter.push_where(&mut count_query);

	let mut page_query = QueryBuilder::<Postgres>::new(ADVOCATE_COLUMNS);

	filter.push_where(&mut page_query);
	page_query.push(" ORDER BY id ASC LIMIT ");
	page_query.push_bind(limit);
	page_query.push(" OFFSET ");
	page_query.push_bind(offset);

	let (total, rows) = tokio::try_join!(
		count_query.build_query_scalar::<i64>().fetch_one(&db.pool),
		page_query.build_query_as::<AdvocateRow>().fetch_all(&db.pool),
	)?;

	Ok(AdvocateSlice { rows, total })
}
