use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = advodir_api::Args::parse();
	advodir_api::run(args).await
}
