pub mod government;
pub mod packaged;
pub mod recipes;

mod error;

pub use error::{Error, Result};

use std::future::Future;

use tokio_util::sync::CancellationToken;

pub(crate) fn client(cfg: &nosh_config::ProviderConfig) -> Result<reqwest::Client> {
	Ok(reqwest::Client::builder()
		.timeout(std::time::Duration::from_millis(cfg.timeout_ms))
		.build()?)
}

/// Race a provider request against the shared cancellation token. A
/// cancelled call never yields data; the caller must not reinterpret it as
/// an empty result set.
pub(crate) async fn race_cancel<F, T>(cancel: &CancellationToken, request: F) -> Result<T>
where
	F: Future<Output = Result<T>>,
{
	tokio::select! {
		biased;

		_ = cancel.cancelled() => Err(Error::Cancelled),
		outcome = request => outcome,
	}
}
