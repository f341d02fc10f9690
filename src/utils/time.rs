use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Parses RFC 3339, falling back to a naive ISO-8601 timestamp taken as UTC.
pub fn parse_flexible(s: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))?;
    Ok(naive.and_utc())
}

/// Short calendar date, e.g. `Oct 18, 2026`.
pub fn format_for_display(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_flexible(&s)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp {}: {}", s, e))),
    }
}
