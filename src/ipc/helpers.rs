/// Param accessors shared by the handler families. Params arrive as loose
/// JSON; required-field errors are raised by the handler that knows the key.
pub fn str_param(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Free-text note params: absent and empty both mean "no note".
pub fn note_param(params: &serde_json::Value, key: &str) -> Option<String> {
    str_param(params, key).filter(|s| !s.trim().is_empty())
}

pub fn f64_param(params: &serde_json::Value, key: &str) -> Option<f64> {
    params.get(key).and_then(|v| v.as_f64())
}
