use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = advodir_browse::Args::parse();
	advodir_browse::run(args).await
}
