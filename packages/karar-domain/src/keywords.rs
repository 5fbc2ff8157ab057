#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordReject {
	Empty,
	TooMany { max: usize },
	BlankKeyword { index: usize },
}
impl KeywordReject {
	pub fn message(&self) -> String {
		match self {
			Self::Empty => "At least one keyword is required.".to_string(),
			Self::TooMany { max } => format!("At most {max} keywords are allowed."),
			Self::BlankKeyword { index } => format!("keywords[{index}] must be non-empty."),
		}
	}
}

pub fn validate_keywords<S>(keywords: &[S], max: usize) -> Result<(), KeywordReject>
where
	S: AsRef<str>,
{
	if keywords.is_empty() {
		return Err(KeywordReject::Empty);
	}
	if keywords.len() > max {
		return Err(KeywordReject::TooMany { max });
	}
	if let Some(index) = keywords.iter().position(|keyword| keyword.as_ref().trim().is_empty()) {
		return Err(KeywordReject::BlankKeyword { index });
	}

	Ok(())
}
