use sqlx::{Postgres, QueryBuilder};

const TEXT_COLUMNS: [&str; 4] = ["first_name", "last_name", "city", "degree"];

/// The row predicate shared by the count and page queries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdvocateFilter {
	pattern: Option<String>,
}
impl AdvocateFilter {
	pub fn match_all() -> Self {
		Self { pattern: None }
	}

	/// Case-insensitive "contains" on the text columns or any specialty. The term is used as given,
	/// whitespace included; only an empty term matches all rows.
	pub fn contains(term: &str) -> Self {
		if term.is_empty() {
			return Self::match_all();
		}

		Self { pattern: Some(like_pattern(term)) }
	}

	pub fn pattern(&self) -> Option<&str> {
		self.pattern.as_deref()
	}

	/// Appends ` WHERE ...` to `builder`, or nothing for match-all. The pattern is always bound.
	pub fn push_where<'args>(&self, builder: &mut QueryBuilder<'args, Postgres>) {
		let Some(pattern) = self.pattern.as_ref() else {
			return;
		};

		builder.push(" WHERE (");

		for (idx, column) in TEXT_COLUMNS.iter().enumerate() {
			if idx > 0 {
				builder.push(" OR ");
			}

			builder.push(*column);
			builder.push(" ILIKE ");
			builder.push_bind(pattern.clone());
			builder.push(" ESCAPE '\\'");
		}

		builder.push(
			" OR EXISTS (SELECT 1 FROM jsonb_array_elements_text(specialties) AS specialty WHERE specialty ILIKE ",
		);
		builder.push_bind(pattern.clone());
		builder.push(" ESCAPE '\\'))");
	}
}

/// Wraps `term` in `%` after escaping `\`, `%` and `_` so they match literally.
pub fn like_pattern(term: &str) -> String {
	let mut out = String::with_capacity(term.len() + 2);

	out.push('%');

	for ch in term.chars() {
		if matches!(ch, '\\' | '%' | '_') {
			out.push('\\');
		}

		out.push(ch);
	}

	out.push('%');

	out
}
