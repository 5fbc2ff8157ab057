const KEYWORD_SEPARATOR: &str = ",";

/// Derives an order-independent cache key for a keyword set.
///
/// Keywords are sorted and repeated entries collapsed before hashing, so any two sets with the
/// same membership map to the same key.
pub fn derive_cache_key<S>(keywords: &[S]) -> String
where
	S: AsRef<str>,
{
	let mut sorted: Vec<&str> = keywords.iter().map(AsRef::as_ref).collect();

	sorted.sort_unstable();
	sorted.dedup();

	let joined = sorted.join(KEYWORD_SEPARATOR);

	blake3::hash(joined.as_bytes()).to_hex().to_string()
}

pub fn cache_key_prefix(key: &str) -> &str {
	let len = key.len().min(12);

	&key[..len]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn key_is_fixed_length_hex() {
		let key = derive_cache_key(&["tazminat"]);

		assert_eq!(key.len(), 64);
		assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
		assert_eq!(cache_key_prefix(&key).len(), 12);
	}

	#[test]
	fn prefix_of_short_key_is_whole_key() {
		assert_eq!(cache_key_prefix("abc"), "abc");
	}
}
