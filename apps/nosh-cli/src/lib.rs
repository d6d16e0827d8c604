use std::path::PathBuf;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use nosh_search::SearchService;

/// One-shot driver for the federated food search. The interactive search
/// screen (debounce, per-keystroke cancellation) lives elsewhere; this
/// binary issues a single call and prints the normalized results as JSON.
#[derive(Debug, Parser)]
#[command(version, rename_all = "kebab")]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Free-text food query.
	pub query: String,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = nosh_config::load(&args.config)?;

	init_tracing(&config);

	let service = SearchService::new(config);
	let cancel = CancellationToken::new();
	let interrupt = cancel.clone();

	tokio::spawn(async move {
		if tokio::signal::ctrl_c().await.is_ok() {
			interrupt.cancel();
		}
	});

	tracing::info!(query = %args.query, "Searching all providers.");

	let results = service.search_all_providers(&args.query, &cancel).await?;

	println!("{}", serde_json::to_string_pretty(&results)?);

	Ok(())
}

fn init_tracing(config: &nosh_config::Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}
