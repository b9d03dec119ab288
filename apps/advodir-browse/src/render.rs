use std::fmt::Write as _;

use advodir_client::Snapshot;

const HEADERS: [&str; 7] =
	["First Name", "Last Name", "City", "Degree", "Specialties", "Years", "Phone"];

/// Renders the settled view as a plain-text table followed by the pagination line.
pub fn render(snapshot: &Snapshot) -> String {
	let rows = snapshot
		.rows
		.iter()
		.map(|advocate| {
			[
				advocate.first_name.clone(),
				advocate.last_name.clone(),
				advocate.city.clone(),
				advocate.degree.clone(),
				advocate.specialties.join(", "),
				advocate.years_of_experience.to_string(),
				advocate.phone_number.to_string(),
			]
		})
		.collect::<Vec<_>>();
	let mut widths = HEADERS.map(|header| header.chars().count());

	for row in &rows {
		for (width, cell) in widths.iter_mut().zip(row) {
			*width = (*width).max(cell.chars().count());
		}
	}

	let mut out = String::new();

	let _ = writeln!(out, "Searching for: {:?}", snapshot.debounced_term);

	push_line(&mut out, &HEADERS.map(str::to_string), &widths);
	push_line(&mut out, &widths.map(|width| "-".repeat(width)), &widths);

	for row in &rows {
		push_line(&mut out, row, &widths);
	}

	let controls = snapshot.controls;

	if controls.total_pages == 0 {
		out.push_str("No results");
	} else {
		let _ = write!(
			out,
			"{} Page {} of {} ({} total) {}",
			if controls.can_previous { "<prev" } else { "     " },
			controls.current_page + 1,
			controls.total_pages,
			snapshot.total,
			if controls.can_next { "next>" } else { "" },
		);
	}
	if let Some(error) = &snapshot.last_error {
		let _ = write!(out, "\nError: {error}");
	}

	out
}

fn push_line(out: &mut String, cells: &[String; 7], widths: &[usize; 7]) {
	let line = cells
		.iter()
		.zip(widths)
		.map(|(cell, width)| format!("{cell:<width$}", width = *width))
		.collect::<Vec<_>>()
		.join(" | ");

	out.push_str(line.trim_end());
	out.push('\n');
}
