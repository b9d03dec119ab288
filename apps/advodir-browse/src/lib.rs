pub mod command;
pub mod render;

use std::time::Duration;

use clap::Parser;
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use advodir_client::{ApiClient, DirectoryClient, PAGE_SIZE, Phase, Snapshot};

use crate::command::Command;

#[derive(Debug, Parser)]
#[command(
	version = advodir_cli::VERSION,
	rename_all = "kebab",
	styles = advodir_cli::styles(),
)]
pub struct Args {
	#[arg(long, value_name = "URL", default_value = "http://127.0.0.1:3000")]
	pub base_url: String,
	#[arg(long, value_name = "MS", default_value_t = 300)]
	pub debounce_ms: u64,
	#[arg(long, value_name = "MS", default_value_t = 10_000)]
	pub timeout_ms: u64,
	#[arg(long, value_name = "FILTER", default_value = "warn")]
	pub log_level: String,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	let api = ApiClient::new(&args.base_url, Duration::from_millis(args.timeout_ms))?;
	let client = DirectoryClient::spawn(api, PAGE_SIZE, Duration::from_millis(args.debounce_ms));
	let mut snapshots = client.subscribe();
	let mut lines = BufReader::new(io::stdin()).lines();
	let mut last_rendered: Option<Snapshot> = None;

	println!("{}", command::HELP);

	loop {
		tokio::select! {
			line = lines.next_line() => {
				let Some(line) = line? else {
					break;
				};
				let parsed = Command::parse(&line);

				tracing::debug!(command = ?parsed, "Applying command.");

				match parsed {
					Command::Quit => break,
					Command::Search(term) => client.set_search_term(term),
					Command::Next => client.next_page(),
					Command::Previous => client.previous_page(),
					Command::Page(page) => client.goto_page(page),
					Command::Reset => client.reset(),
					Command::Unknown(input) => eprintln!("Unknown command {input:?}.\n{}", command::HELP),
				}
			},
			changed = snapshots.changed() => {
				if changed.is_err() {
					break;
				}

				let snapshot = snapshots.borrow_and_update().clone();

				if snapshot.phase == Phase::Settled && last_rendered.as_ref() != Some(&snapshot) {
					println!("{}", render::render(&snapshot));

					last_rendered = Some(snapshot);
				}
			},
		}
	}

	Ok(())
}
