pub const HELP: &str = "\
Type to search. Commands: :next, :prev, :page N, :reset, :quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	Search(String),
	Next,
	Previous,
	/// Zero-based page index.
	Page(u32),
	Reset,
	Quit,
	Unknown(String),
}
impl Command {
	/// Lines starting with `:` are commands; anything else replaces the search term.
	pub fn parse(line: &str) -> Self {
		let Some(rest) = line.trim().strip_prefix(':') else {
			return Self::Search(line.to_string());
		};
		let mut parts = rest.split_whitespace();

		match (parts.next(), parts.next(), parts.next()) {
			(Some("next" | "n"), None, None) => Self::Next,
			(Some("prev" | "p"), None, None) => Self::Previous,
			(Some("reset" | "r"), None, None) => Self::Reset,
			(Some("quit" | "q"), None, None) => Self::Quit,
			(Some("page"), Some(number), None) => match number.parse::<u32>() {
				Ok(page) if page > 0 => Self::Page(page - 1),
				_ => Self::Unknown(line.to_string()),
			},
			_ => Self::Unknown(line.to_string()),
		}
	}
}
