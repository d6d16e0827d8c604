use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = nosh_cli::Args::parse();

	nosh_cli::run(args).await
}
