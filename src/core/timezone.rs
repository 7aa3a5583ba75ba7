use chrono::{DateTime, Duration, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

/// Shop-local zone used for calendar boundaries and chart labels
pub const DEFAULT_REPORT_TIMEZONE: Tz = chrono_tz::America::Mexico_City;

/// Parse an IANA time zone name such as `America/Mexico_City`
pub fn parse_timezone(name: &str) -> Result<Tz, String> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| format!("Unknown time zone: {}", name))
}

/// Calendar date of `instant` as seen on the shop's wall clock
pub fn local_date(instant: DateTime<Utc>, tz: &Tz) -> NaiveDate {
    instant.with_timezone(tz).date_naive()
}

/// First instant of `date` in `tz`, as UTC.
///
/// When midnight does not exist locally (DST gap) the first valid instant of
/// the following hour is used.
pub fn local_midnight(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);

    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&naive))
}

/// ISO 8601 UTC with millisecond precision, e.g. `2025-10-16T10:00:00.000Z`
pub fn format_iso8601_millis(utc_time: DateTime<Utc>) -> String {
    utc_time.to_rfc3339_opts(SecondsFormat::Millis, true)
}
