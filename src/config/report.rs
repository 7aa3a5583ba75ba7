use chrono_tz::Tz;
use std::env;

use crate::core::timezone::{parse_timezone, DEFAULT_REPORT_TIMEZONE};
use crate::core::{AppError, Result};
use crate::modules::reports::models::{SeriesOrder, WindowStyle};

/// Reporting knobs: shop time zone, per-endpoint window rules, series ordering
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub timezone: Tz,
    /// Window rule for `/reports/resumen`
    pub summary_window: WindowStyle,
    /// Window rule for `/reports/ingresos`
    pub series_window: WindowStyle,
    pub series_order: SeriesOrder,
    pub recent_orders_limit: i64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_REPORT_TIMEZONE,
            summary_window: WindowStyle::Trailing,
            series_window: WindowStyle::PeriodToDate,
            series_order: SeriesOrder::FirstSeen,
            recent_orders_limit: 5,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let timezone = match env::var("REPORT_TIMEZONE") {
            Ok(name) => parse_timezone(&name).map_err(AppError::Configuration)?,
            Err(_) => defaults.timezone,
        };

        Ok(ReportConfig {
            timezone,
            summary_window: parse_var("REPORT_SUMMARY_WINDOW", defaults.summary_window)?,
            series_window: parse_var("REPORT_SERIES_WINDOW", defaults.series_window)?,
            series_order: parse_var("REPORT_SERIES_ORDER", defaults.series_order)?,
            recent_orders_limit: parse_var(
                "REPORT_RECENT_ORDERS_LIMIT",
                defaults.recent_orders_limit,
            )?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.recent_orders_limit <= 0 {
            return Err(AppError::Configuration(
                "REPORT_RECENT_ORDERS_LIMIT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        Err(_) => Ok(default),
    }
}
