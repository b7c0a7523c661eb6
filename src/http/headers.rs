use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

const ENTRY_SEPARATOR: char = ';';
const NAME_VALUE_SEPARATOR: char = ':';

/// Splits `"Name: Value; Other: 2"` into trimmed pairs, in order. Entries
/// without a `:` are skipped; the value keeps any further colons.
#[must_use]
pub fn parse_header_spec(spec: &str) -> Vec<(String, String)> {
    spec.split(ENTRY_SEPARATOR)
        .filter_map(|entry| entry.split_once(NAME_VALUE_SEPARATOR))
        .map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
        .collect()
}

/// Builds the header set for one request. Later entries overwrite earlier
/// ones with the same name; names or values that are not valid HTTP are
/// skipped.
#[must_use]
pub fn header_map_from_spec(spec: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in parse_header_spec(spec) {
        let header_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(header_name) => header_name,
            Err(err) => {
                debug!("Skipping header '{}': {}", name, err);
                continue;
            }
        };
        let header_value = match HeaderValue::from_str(&value) {
            Ok(header_value) => header_value,
            Err(err) => {
                debug!("Skipping header '{}': {}", name, err);
                continue;
            }
        };
        headers.insert(header_name, header_value);
    }
    headers
}
