pub mod channels;
pub mod chat;
pub mod dashboard;
pub mod follows;
pub mod streams;

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Backends hand out numeric ids in some places and string ids in others.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(s)) => s,
        Some(RawId::Int(n)) => n.to_string(),
        Some(RawId::Float(f)) => f.to_string(),
        None => String::new(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    fn as_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Int(n) => Some(*n as f64),
            RawNumber::Float(f) => Some(*f),
            RawNumber::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Counters that may arrive as `12`, `12.0` or `"12"`; anything unreadable or negative is zero.
pub(crate) fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?
        .and_then(|n| n.as_f64())
        .filter(|f| f.is_finite() && *f > 0.0)
        .map(|f| f.round() as u64)
        .unwrap_or_default())
}

/// An optional epoch timestamp with the same leniency as [`lenient_count`].
pub(crate) fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?
        .and_then(|n| n.as_f64())
        .filter(|f| f.is_finite())
        .map(|f| f.round() as i64))
}

pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
