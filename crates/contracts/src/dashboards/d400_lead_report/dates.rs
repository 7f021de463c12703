use super::record::LeadRecord;
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, Utc};
use serde_json::Value;

/// ISO timestamps with an offset that RFC 3339 rejects: minute precision, `+0530`
const OFFSET_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Naive timestamp layouts accepted besides RFC 3339
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Resolves the calendar date of a lead record.
///
/// Timestamps carrying an offset (RFC 3339, epoch millis) are shifted into `offset`
/// before the date is taken, so a visit logged at 23:30 local time stays on its local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateReader {
    offset: FixedOffset,
}

impl Default for DateReader {
    fn default() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl DateReader {
    /// Offset in minutes east of UTC; out-of-range values fall back to UTC
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Date of the record, `None` when the date field is absent or unparsable
    pub fn record_date(&self, record: &LeadRecord) -> Option<NaiveDate> {
        record.date_value().and_then(|value| self.parse(value))
    }

    /// Calendar month of the record, 0-indexed (January = 0)
    pub fn record_month0(&self, record: &LeadRecord) -> Option<u32> {
        self.record_date(record).map(|date| date.month0())
    }

    pub fn parse(&self, value: &Value) -> Option<NaiveDate> {
        match value {
            Value::String(s) => self.parse_str(s),
            Value::Number(n) => {
                let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
                DateTime::from_timestamp_millis(millis)
                    .map(|dt| dt.with_timezone(&self.offset).date_naive())
            }
            _ => None,
        }
    }

    pub fn parse_str(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
            OFFSET_DATETIME_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        });
        if let Some(dt) = with_offset {
            return Some(dt.with_timezone(&self.offset).date_naive());
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
                return Some(dt.date());
            }
        }

        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_plain_dates() {
        let reader = DateReader::default();
        assert_eq!(reader.parse_str("2024-01-05"), Some(ymd(2024, 1, 5)));
        assert_eq!(reader.parse_str(" 2024-01-05 "), Some(ymd(2024, 1, 5)));
        assert_eq!(reader.parse_str("03/15/2024"), Some(ymd(2024, 3, 15)));
        assert_eq!(reader.parse_str("2024-01-05 10:30"), Some(ymd(2024, 1, 5)));
        assert_eq!(reader.parse_str("2024-01-05T10:30:00"), Some(ymd(2024, 1, 5)));
        assert_eq!(
            reader.parse_str("2024-01-05T10:30:00.250"),
            Some(ymd(2024, 1, 5))
        );
    }

    #[test]
    fn test_rejects_invalid_dates() {
        let reader = DateReader::default();
        assert_eq!(reader.parse_str(""), None);
        assert_eq!(reader.parse_str("not a date"), None);
        assert_eq!(reader.parse_str("2024-02-30"), None);
        assert_eq!(reader.parse_str("2024-13-01"), None);
        assert_eq!(reader.parse(&json!(true)), None);
        assert_eq!(reader.parse(&json!(null)), None);
    }

    #[test]
    fn test_rfc3339_is_shifted_into_offset() {
        // 18:30Z on Jan 31 is already Feb 1 in IST (+05:30)
        let utc = DateReader::default();
        let ist = DateReader::from_offset_minutes(330);
        assert_eq!(utc.parse_str("2024-01-31T18:30:00.000Z"), Some(ymd(2024, 1, 31)));
        assert_eq!(ist.parse_str("2024-01-31T18:30:00.000Z"), Some(ymd(2024, 2, 1)));
    }

    #[test]
    fn test_offset_timestamps_outside_rfc3339() {
        let utc = DateReader::default();
        let ist = DateReader::from_offset_minutes(330);
        assert_eq!(utc.parse_str("2024-01-05T10:30Z"), Some(ymd(2024, 1, 5)));
        assert_eq!(ist.parse_str("2024-01-31T20:30Z"), Some(ymd(2024, 2, 1)));
        // 02:00 at +05:30 is 20:30 UTC the previous day
        assert_eq!(utc.parse_str("2024-02-01T02:00:00+0530"), Some(ymd(2024, 1, 31)));
        assert_eq!(utc.parse_str("2024-02-01T02:00:00.500+0530"), Some(ymd(2024, 1, 31)));
        assert_eq!(utc.parse_str("2024-02-01T02:00+05:30"), Some(ymd(2024, 1, 31)));
        assert_eq!(utc.parse_str("2024-02-30T02:00Z"), None);
    }

    #[test]
    fn test_epoch_millis() {
        let reader = DateReader::default();
        // 2024-01-05T00:00:00Z
        assert_eq!(reader.parse(&json!(1_704_412_800_000_i64)), Some(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let reader = DateReader::from_offset_minutes(100_000);
        assert_eq!(reader.offset(), Utc.fix());
    }
}
