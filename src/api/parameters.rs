use serde_json::{Map, Value};

/// Caller-supplied query parameters, e.g. `{"limit": 10, "computerName__contains": "db"}`.
pub type Parameters = Map<String, Value>;

/// The query parameter the API uses to scope a request to specific sites.
pub const SITE_IDS_PARAMETER: &str = "siteIds";

/// Renders the site scope the way the API has always been sent it:
/// the IDs comma-joined and wrapped in literal double quotes, e.g. `"a,b"`.
pub fn site_scope_value(site_ids: &[String]) -> String {
    format!("\"{}\"", site_ids.join(","))
}

/// Turns caller parameters into the query pairs we actually send.
///
/// The caller's map is left untouched. When `site_ids` is non-empty, a `siteIds`
/// pair is added, replacing any the caller passed in.
pub fn query_pairs(parameters: Option<&Parameters>, site_ids: &[String]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = parameters
        .into_iter()
        .flatten()
        .filter(|(key, _)| site_ids.is_empty() || key.as_str() != SITE_IDS_PARAMETER)
        .filter_map(|(key, value)| render(value).map(|rendered| (key.clone(), rendered)))
        .collect();

    if !site_ids.is_empty() {
        pairs.push((SITE_IDS_PARAMETER.to_string(), site_scope_value(site_ids)));
    }
    pairs
}

/// A single query value. Strings go out as-is, arrays are comma-joined
/// (which is how the API takes list filters), and `null` means "leave it out".
fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(render)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
