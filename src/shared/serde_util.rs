//! Custom serde helpers for backend wire formats.

/// Deserializes Unix millis (`i64`/`u64`) into `DateTime<Utc>`.
///
/// Kline rows carry `open_time` / `close_time` as epoch milliseconds.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis)))
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(value.timestamp_millis())
    }
}

/// Optional variant of [`timestamp_ms`]; a missing or `null` field becomes `None`.
pub mod timestamp_ms_opt {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<i64>::deserialize(deserializer)? {
            Some(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis))),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_some(&v.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }
}

/// Deserializes a timestamp sent either as epoch milliseconds or as an ISO-8601 string.
///
/// The live price socket has sent both shapes over time.
pub mod timestamp_flexible {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Float(f64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => DateTime::<Utc>::from_timestamp_millis(ms),
            Raw::Float(ms) => DateTime::<Utc>::from_timestamp_millis(ms as i64),
            Raw::Text(s) => parse_iso(&s),
        };
        parsed.ok_or_else(|| serde::de::Error::custom("Invalid timestamp"))
    }

    fn parse_iso(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }
        // Naive ISO strings (no offset) are treated as UTC.
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
