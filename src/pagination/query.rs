//! Query-string encoding for page requests

use super::types::PageRequest;
use url::form_urlencoded;

/// Encode present parameters as a `?`-prefixed query string
///
/// Absent values are dropped. Every present value is kept, including `0`,
/// `""` and `false`. Returns an empty string when nothing is present.
pub fn encode_query(params: &PageRequest) -> String {
    if params.is_empty() {
        return String::new();
    }

    let mut serializer = form_urlencoded::Serializer::new(String::from("?"));
    for (key, value) in params.iter() {
        serializer.append_pair(key, &value.to_string());
    }
    serializer.finish()
}
