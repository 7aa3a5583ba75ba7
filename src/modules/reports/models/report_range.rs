// Report windows and chart labels.
//
// Every report takes a range token (week / month / year). The token turns
// into a lower bound `from`; the window is everything at or after `from`.
// The summary and the revenue series historically disagree on where a
// window starts, so the start rule is a separate `WindowStyle` chosen per
// endpoint.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::core::timezone::{local_date, local_midnight};

/// Weekday abbreviations (es-MX), Monday first
const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

/// Month abbreviations (es-MX), January first
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Range selector accepted by the report endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    #[default]
    Week,
    Month,
    Year,
}

impl ReportRange {
    /// Resolve a caller-supplied token, trimmed and case-insensitive. Missing
    /// or unknown tokens fall back to `Week`.
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(|t| t.trim().to_ascii_lowercase()).as_deref() {
            Some("month") => ReportRange::Month,
            Some("year") => ReportRange::Year,
            _ => ReportRange::Week,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportRange::Week => "week",
            ReportRange::Month => "month",
            ReportRange::Year => "year",
        }
    }

    /// Lower bound of the window ending at `now`.
    ///
    /// Calendar arithmetic (month/year) happens on the shop's local date and
    /// lands on local midnight. A day that does not exist in the target month
    /// clamps to that month's last day.
    pub fn window_start(&self, style: WindowStyle, now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
        let today = local_date(now, tz);

        match (style, self) {
            (WindowStyle::Trailing, ReportRange::Week) => now - Duration::days(7),
            (WindowStyle::Trailing, ReportRange::Month) => {
                local_midnight(months_before(today, 1), tz)
            }
            (WindowStyle::Trailing, ReportRange::Year) => {
                local_midnight(months_before(today, 12), tz)
            }
            (WindowStyle::PeriodToDate, ReportRange::Week) => now - Duration::days(6),
            (WindowStyle::PeriodToDate, ReportRange::Month) => {
                local_midnight(today.with_day(1).unwrap_or(today), tz)
            }
            (WindowStyle::PeriodToDate, ReportRange::Year) => local_midnight(
                NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today),
                tz,
            ),
        }
    }

    /// Bucket label for a revenue chart point
    ///
    /// - week: weekday abbreviation (`"jue"`)
    /// - month: day and month (`"16 oct"`)
    /// - year: month and year (`"oct 2025"`)
    pub fn bucket_label(&self, instant: DateTime<Utc>, tz: &Tz) -> String {
        let local = instant.with_timezone(tz);
        let month = MONTH_ABBREVIATIONS[local.month0() as usize];

        match self {
            ReportRange::Week => {
                WEEKDAY_ABBREVIATIONS[local.weekday().num_days_from_monday() as usize].to_string()
            }
            ReportRange::Month => format!("{} {}", local.day(), month),
            ReportRange::Year => format!("{} {}", month, local.year()),
        }
    }
}

impl std::fmt::Display for ReportRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months)).unwrap_or(date)
}

/// Rule for turning a range token into a window start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowStyle {
    /// week: now - 7 days, month: same day last month, year: same day last year
    Trailing,
    /// week: now - 6 days, month: 1st of this month, year: January 1st
    PeriodToDate,
}

impl std::fmt::Display for WindowStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowStyle::Trailing => write!(f, "trailing"),
            WindowStyle::PeriodToDate => write!(f, "period_to_date"),
        }
    }
}

impl std::str::FromStr for WindowStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trailing" => Ok(WindowStyle::Trailing),
            "period_to_date" => Ok(WindowStyle::PeriodToDate),
            other => Err(format!("Invalid window style: {}", other)),
        }
    }
}

/// Ordering of revenue series buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesOrder {
    /// Buckets appear in the order their first payment was read
    #[default]
    FirstSeen,
    /// Buckets sorted by their earliest payment
    Chronological,
}

impl SeriesOrder {
    /// Resolve the `sort` query parameter, keeping `default` for missing or unknown values
    pub fn from_query(value: Option<&str>, default: SeriesOrder) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}

impl std::fmt::Display for SeriesOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesOrder::FirstSeen => write!(f, "first_seen"),
            SeriesOrder::Chronological => write!(f, "chronological"),
        }
    }
}

impl std::str::FromStr for SeriesOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first_seen" => Ok(SeriesOrder::FirstSeen),
            "chronological" => Ok(SeriesOrder::Chronological),
            other => Err(format!("Invalid series order: {}", other)),
        }
    }
}
