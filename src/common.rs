/// Common types and utilities shared by the inventory and report entry points
use chrono::{FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::ServiceError;

/// Calendar-day format accepted for report bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar-day bounds of a sales report, in the caller's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Offset used to turn order timestamps into calendar days.
    pub offset: FixedOffset,
}

impl ReportQuery {
    /// Builds a UTC-calendar query, rejecting `start_date > end_date`.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self, ServiceError> {
        if start_date > end_date {
            return Err(ServiceError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            offset: utc(),
        })
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    /// Number of calendar days covered, zero for an inverted range.
    pub fn day_count(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }
}

/// Date range parameters as they arrive from the request layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl DateRangeParams {
    /// Parses both bounds and resolves the calendar offset, falling back to `default_offset`.
    pub fn to_report_query(
        &self,
        default_offset: FixedOffset,
    ) -> Result<ReportQuery, ServiceError> {
        let start_date = parse_date(&self.start_date, "start")?;
        let end_date = parse_date(&self.end_date, "end")?;

        let offset = match self.utc_offset_minutes {
            Some(minutes) => offset_from_minutes(minutes)?,
            None => default_offset,
        };

        Ok(ReportQuery::new(start_date, end_date)?.with_offset(offset))
    }
}

/// Optional pagination parameters; unset values are resolved against configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PaginationParams {
    /// Returns `(page, page_size)` with defaults applied and the page size capped.
    pub fn resolve(&self, config: &AppConfig) -> (u32, u32) {
        let page = self.page.unwrap_or(1);
        let page_size = self
            .page_size
            .unwrap_or(config.default_page_size)
            .min(config.max_page_size);
        (page, page_size)
    }
}

fn parse_date(value: &str, which: &str) -> Result<NaiveDate, ServiceError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| ServiceError::InvalidDate(format!("Invalid {} date format: {}", which, e)))
}

pub(crate) fn utc() -> FixedOffset {
    Utc.fix()
}

/// Converts an offset expressed in minutes east of UTC.
pub fn offset_from_minutes(minutes: i32) -> Result<FixedOffset, ServiceError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            ServiceError::invalid_argument(format!("utc offset out of range: {} minutes", minutes))
        })
}
