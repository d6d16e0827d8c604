pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("Provider call was cancelled.")]
	Cancelled,
}

impl Error {
	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}
