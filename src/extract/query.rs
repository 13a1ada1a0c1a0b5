//! Query-string decomposition.

use std::collections::HashMap;
use url::Url;

use super::ExtractError;

/// Query parameters of a URL, one value per name
pub type QueryParameters = HashMap<String, String>;

/// Decompose the query component of `url` into a name → value map.
///
/// When a name repeats, the first value is kept. Names with no value
/// (`?flag` or `?flag=`) are left out of the map. A URL without a query
/// yields an empty map.
pub fn query_parameters(url: &str) -> Result<QueryParameters, ExtractError> {
    let parsed = Url::parse(url)?;

    let mut params = QueryParameters::new();
    for (key, value) in parsed.query_pairs() {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }

    Ok(params)
}
