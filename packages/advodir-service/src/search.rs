use advodir_domain::{Advocate, AdvocatePage, PageQuery, RawPageParams};
use advodir_storage::{filter::AdvocateFilter, models::AdvocateRow, queries};

use crate::{DirectoryService, Result};

impl DirectoryService {
	/// Normalizes raw query-string values with the configured limits, then searches.
	pub async fn search_raw(&self, raw: &RawPageParams) -> Result<AdvocatePage> {
		let query = PageQuery::from_raw(raw, self.limits);

		self.search(&query).await
	}

	pub async fn search(&self, query: &PageQuery) -> Result<AdvocatePage> {
		let filter = match query.search.as_deref() {
			Some(term) => AdvocateFilter::contains(term),
			None => AdvocateFilter::match_all(),
		};
		let limit = i64::from(self.limits.cap(query.limit).max(1));
		let offset = i64::try_from(query.offset).unwrap_or(i64::MAX);
		let slice = queries::search_advocates(&self.db, &filter, limit, offset).await?;
		let total = u64::try_from(slice.total).unwrap_or_default();
		let data = slice.rows.into_iter().map(advocate_from_row).collect::<Vec<_>>();

		tracing::debug!(
			search = query.search.as_deref().unwrap_or(""),
			limit,
			offset,
			total,
			returned = data.len(),
			"Advocate search completed."
		);

		Ok(AdvocatePage { data, total })
	}
}

fn advocate_from_row(row: AdvocateRow) -> Advocate {
	Advocate {
		id: row.id,
		first_name: row.first_name,
		last_name: row.last_name,
		city: row.city,
		degree: row.degree,
		specialties: row.specialties.0,
		years_of_experience: row.years_of_experience,
		phone_number: row.phone_number,
		created_at: row.created_at,
	}
}
