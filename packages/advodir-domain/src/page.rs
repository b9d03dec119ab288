use serde::{Deserialize, Serialize};

/// Query-string parameters exactly as received. Every field stays a string so malformed numbers
/// can fall back to defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPageParams {
	pub search: Option<String>,
	pub limit: Option<String>,
	pub offset: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
	pub default_limit: u32,
	/// `None` leaves positive limits untouched.
	pub max_limit: Option<u32>,
}
impl PageLimits {
	/// Applies the configured cap, if any.
	pub fn cap(&self, limit: u32) -> u32 {
		match self.max_limit {
			Some(max_limit) => limit.min(max_limit),
			None => limit,
		}
	}
}
impl Default for PageLimits {
	fn default() -> Self {
		Self { default_limit: PageQuery::DEFAULT_LIMIT, max_limit: None }
	}
}

/// A normalized directory query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
	/// Non-empty search term, kept verbatim. `None` means match all.
	pub search: Option<String>,
	pub limit: u32,
	pub offset: u64,
}
impl PageQuery {
	pub const DEFAULT_LIMIT: u32 = 25;

	pub fn new(search: Option<&str>, limit: u32, offset: u64) -> Self {
		let search = search.filter(|term| !term.is_empty()).map(str::to_string);

		Self { search, limit: limit.max(1), offset }
	}

	/// Query for the zero-based `page` of `page_size` rows.
	pub fn for_page(search: &str, page: u32, page_size: u32) -> Self {
		Self::new(Some(search), page_size, u64::from(page) * u64::from(page_size))
	}

	/// Lenient normalization: non-numeric or non-positive `limit` becomes the default, a configured
	/// `max_limit` caps the rest, and a non-numeric or negative `offset` becomes zero.
	pub fn from_raw(raw: &RawPageParams, limits: PageLimits) -> Self {
		let limit = raw
			.limit
			.as_deref()
			.and_then(|value| value.trim().parse::<i64>().ok())
			.filter(|value| *value > 0)
			.map(|value| limits.cap(u32::try_from(value).unwrap_or(u32::MAX)))
			.unwrap_or(limits.default_limit);
		let offset = raw
			.offset
			.as_deref()
			.and_then(|value| value.trim().parse::<i64>().ok())
			.map(|value| value.max(0) as u64)
			.unwrap_or(0);

		Self::new(raw.search.as_deref(), limit, offset)
	}

	/// Query-string pairs for an HTTP request. `search` is omitted when there is no term.
	pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
		let mut pairs = Vec::with_capacity(3);

		if let Some(search) = &self.search {
			pairs.push(("search", search.clone()));
		}

		pairs.push(("limit", self.limit.to_string()));
		pairs.push(("offset", self.offset.to_string()));

		pairs
	}
}

/// `ceil(total / page_size)`; zero when there are no rows.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
	if page_size == 0 {
		return 0;
	}

	let pages = total.div_ceil(u64::from(page_size));

	u32::try_from(pages).unwrap_or(u32::MAX)
}
