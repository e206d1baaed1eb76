use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Clients send durations and priorities as floats, strings or ints. Anything
// unusable becomes `None` so the caller's default applies.
fn rounded(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().map(f64::round),
        Value::String(s) => s.trim().parse::<f64>().ok().map(f64::round),
        _ => None,
    }
}

pub(crate) fn deserialize_optional_rounded_u32<'de, D>(
    deserializer: D,
) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value
        .and_then(rounded)
        .filter(|f| *f >= 0.0)
        .map(|f| f.min(u32::MAX as f64) as u32))
}

// Custom deserializer for optional u8 fields
pub(crate) fn deserialize_optional_rounded_u8<'de, D>(
    deserializer: D,
) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Value> = Option::deserialize(deserializer)?;
    Ok(value
        .and_then(rounded)
        .filter(|f| *f >= 0.0)
        .map(|f| f.min(u8::MAX as f64) as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "deserialize_optional_rounded_u8")]
        priority: Option<u8>,
        #[serde(default, deserialize_with = "deserialize_optional_rounded_u32")]
        minutes: Option<u32>,
    }

    #[test]
    fn accepts_floats_strings_and_garbage() {
        let p: Probe = serde_json::from_str(r#"{"priority": 4.6, "minutes": "90"}"#).unwrap();
        assert_eq!(p.priority, Some(5));
        assert_eq!(p.minutes, Some(90));

        let p: Probe = serde_json::from_str(r#"{"priority": "high", "minutes": -3}"#).unwrap();
        assert_eq!(p.priority, None);
        assert_eq!(p.minutes, None);

        let p: Probe = serde_json::from_str("{}").unwrap();
        assert_eq!(p.priority, None);
    }
}
