pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Search failed: {message}")]
	InternalSearch { message: String },
	#[error("Collaborator error: {message}")]
	Collaborator { message: String },
}
impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Collaborator { message: err.to_string() }
	}
}
