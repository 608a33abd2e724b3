//! Time utilities: parsing HH:MM, duration formatting, ISO timestamp serde.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, Local, NaiveTime, Utc};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

/// Validate an `HH:MM` string and return it zero-padded ("9:5" → "09:05").
/// Slot times are compared as strings, which is only correct in this form.
pub fn normalize_hhmm(t: &str) -> AppResult<String> {
    let parsed = parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))?;
    Ok(parsed.format("%H:%M").to_string())
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Local wall-clock time, `HH:MM`.
pub fn local_hhmm(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M").to_string()
}

/// Local calendar date, `DD.MM.YYYY`.
pub fn local_date(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%d.%m.%Y").to_string()
}

/// Same local day as `ts`, wall-clock time replaced by `time`.
pub fn at_local_time(ts: &DateTime<Utc>, time: NaiveTime) -> AppResult<DateTime<Utc>> {
    let day = ts.with_timezone(&Local).date_naive();
    day.and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::InvalidTime(time.format("%H:%M").to_string()))
}

/// `Xh Ym`, truncating towards zero like the summary sheets do.
pub fn format_duration(d: Duration) -> String {
    let mins = d.num_minutes();
    format!("{}h {}m", mins / 60, mins % 60)
}

/// Minutes as "45 min" below one hour, "1h 5m" above.
pub fn format_minutes(mins: i64) -> String {
    if mins.abs() < 60 {
        format!("{} min", mins)
    } else {
        format!("{}h {}m", mins / 60, (mins % 60).abs())
    }
}

/// Serde adapter: ISO 8601 UTC with millisecond precision
/// (`2025-03-01T08:00:00.000Z`). Any RFC 3339 offset is accepted on input.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{raw}': {e}")))
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            ts: &Option<DateTime<Utc>>,
            s: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => super::serialize(ts, s),
                None => s.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            d: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(with = "super")] DateTime<Utc>);

            let v: Option<Wrapper> = Option::deserialize(d)?;
            Ok(v.map(|Wrapper(ts)| ts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hhmm_is_zero_padded() {
        assert_eq!(normalize_hhmm("9:05").unwrap(), "09:05");
        assert_eq!(normalize_hhmm("17:30").unwrap(), "17:30");
        assert!(normalize_hhmm("25:00").is_err());
        assert!(normalize_hhmm("noon").is_err());
    }

    #[test]
    fn durations_render_like_the_summary() {
        assert_eq!(format_duration(Duration::minutes(135)), "2h 15m");
        assert_eq!(format_duration(Duration::seconds(59)), "0h 0m");
        assert_eq!(format_minutes(45), "45 min");
        assert_eq!(format_minutes(65), "1h 5m");
    }

    #[test]
    fn local_time_keeps_the_local_day() {
        let ts = Local
            .with_ymd_and_hms(2025, 3, 3, 14, 47, 12)
            .unwrap()
            .with_timezone(&Utc);
        let moved = at_local_time(&ts, NaiveTime::from_hms_opt(8, 15, 0).unwrap()).unwrap();
        assert_eq!(local_hhmm(&moved), "08:15");
        assert_eq!(local_date(&moved), "03.03.2025");
    }
}
