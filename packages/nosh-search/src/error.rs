pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The only failure the search entrypoint surfaces. Provider outages are
/// recovered round-by-round and never reach the caller; a cancelled call's
/// partial output must be discarded, not read as "no results".
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Search was cancelled.")]
	Cancelled,
}
