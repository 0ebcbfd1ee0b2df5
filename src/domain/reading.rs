// Sensor reading domain model
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// ISO-8601 date-times without an offset, read as display-local time.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One timestamped sample from the aquarium sensors.
///
/// The timestamp is kept in its serialized form; parsing happens when the
/// widget compares it against the range cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub timestamp: String,
    pub temperature: f64,
    #[serde(alias = "ph")]
    pub acidity: f64,
    #[serde(alias = "tdsLevel")]
    pub dissolved_solids_level: f64,
}

impl Reading {
    pub fn new(
        timestamp: impl Into<String>,
        temperature: f64,
        acidity: f64,
        dissolved_solids_level: f64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            temperature,
            acidity,
            dissolved_solids_level,
        }
    }

    /// Parsed instant, or `None` when the timestamp is not ISO-8601.
    ///
    /// Timestamps carrying an offset are taken as is. Date-times without one
    /// are read in `local`, and a bare date is midnight UTC.
    pub fn instant(&self, local: FixedOffset) -> Option<DateTime<Utc>> {
        let raw = self.timestamp.trim();

        if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
            return Some(t.with_timezone(&Utc));
        }

        if let Some(naive) = LOCAL_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        {
            return local
                .from_local_datetime(&naive)
                .single()
                .map(|t| t.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_deserialize_accepts_short_field_names() {
        let json = r#"{"timestamp":"2026-10-16T08:00:00Z","temperature":24.1,"ph":8.2,"tdsLevel":410}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.acidity, 8.2);
        assert_eq!(reading.dissolved_solids_level, 410.0);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"timestamp":"2026-10-16T08:00:00Z","temperature":24.1,"acidity":8.2,"dissolvedSolidsLevel":410}"#;
        let reading: Reading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.temperature, 24.1);
        assert_eq!(reading.dissolved_solids_level, 410.0);
    }

    #[test]
    fn test_instant() {
        let reading = Reading::new("2026-10-16T10:30:00+02:00", 25.0, 7.0, 300.0);
        assert_eq!(
            reading.instant(utc()),
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 8, 30, 0).unwrap())
        );

        let garbled = Reading::new("yesterday-ish", 25.0, 7.0, 300.0);
        assert_eq!(garbled.instant(utc()), None);
    }

    #[test]
    fn test_instant_without_offset_uses_local() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let expected = Some(Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap());

        assert_eq!(Reading::new("2026-10-16T11:00:00", 25.0, 7.0, 300.0).instant(cest), expected);
        assert_eq!(
            Reading::new("2026-10-16T11:00:00.250", 25.0, 7.0, 300.0)
                .instant(cest)
                .map(|t| t.timestamp()),
            expected.map(|t| t.timestamp())
        );
        assert_eq!(Reading::new("2026-10-16T11:00", 25.0, 7.0, 300.0).instant(cest), expected);
        assert_eq!(Reading::new("2026-10-16 11:00:00", 25.0, 7.0, 300.0).instant(cest), expected);
    }

    #[test]
    fn test_instant_bare_date_is_utc_midnight() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(
            Reading::new("2026-10-16", 25.0, 7.0, 300.0).instant(cest),
            Some(Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap())
        );
    }
}
