use serde_json::Value;

/// Read a JSON number as an integer.
///
/// Integral floats such as `2.0` count as integers; `2.5`, strings and
/// values outside the `i64` range do not.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(raw) = value.as_i64() {
        return Some(raw);
    }
    let raw = value.as_f64()?;
    // i64::MAX is not representable as f64; the exclusive bound is 2^63
    let in_range = raw >= i64::MIN as f64 && raw < 9_223_372_036_854_775_808.0;
    (raw.fract() == 0.0 && in_range).then_some(raw as i64)
}
