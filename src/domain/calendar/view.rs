//! Calendar views and date navigation

use crate::error::{ClinicError, Result};
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Granularity of the appointments calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl CalendarView {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalendarView::Month => "month",
            CalendarView::Week => "week",
            CalendarView::Day => "day",
        }
    }
}

impl FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(CalendarView::Month),
            "week" => Ok(CalendarView::Week),
            "day" => Ok(CalendarView::Day),
            _ => Err(format!(
                "Invalid view: '{}'. Valid views are: month, week, day",
                s
            )),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sunday on or before `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Saturday on or after `date`
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some((next - first).num_days() as u32)
}

/// Current position of the calendar
///
/// Month stepping clamps to the end of shorter months, so the cursor keeps
/// the day of month it started from in `anchor_day`. That makes every step
/// reversible: `step(1)` followed by `step(-1)` lands on the starting date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub view: CalendarView,
    pub date: NaiveDate,
    anchor_day: u32,
}

impl CalendarCursor {
    pub fn new(view: CalendarView, date: NaiveDate) -> Self {
        CalendarCursor {
            view,
            date,
            anchor_day: date.day(),
        }
    }

    /// Jump to a date, forgetting the month anchor
    pub fn jump_to(self, date: NaiveDate) -> Self {
        CalendarCursor::new(self.view, date)
    }

    /// Move `n` periods forward (negative moves backward)
    pub fn step(self, n: i32) -> Result<Self> {
        let out_of_range = || ClinicError::InvalidArgument("date out of range".to_string());

        match self.view {
            CalendarView::Month => {
                let first = self.date.with_day(1).ok_or_else(out_of_range)?;
                let months = Months::new(n.unsigned_abs());
                let target = if n >= 0 {
                    first.checked_add_months(months)
                } else {
                    first.checked_sub_months(months)
                }
                .ok_or_else(out_of_range)?;
                let last_day =
                    days_in_month(target.year(), target.month()).ok_or_else(out_of_range)?;
                let date = target
                    .with_day(self.anchor_day.min(last_day))
                    .ok_or_else(out_of_range)?;
                Ok(CalendarCursor {
                    view: self.view,
                    date,
                    anchor_day: self.anchor_day,
                })
            }
            CalendarView::Week => {
                let date = self
                    .date
                    .checked_add_signed(Duration::weeks(i64::from(n)))
                    .ok_or_else(out_of_range)?;
                Ok(self.jump_to(date))
            }
            CalendarView::Day => {
                let date = self
                    .date
                    .checked_add_signed(Duration::days(i64::from(n)))
                    .ok_or_else(out_of_range)?;
                Ok(self.jump_to(date))
            }
        }
    }

    /// Label shown between the previous/next controls
    pub fn header_label(&self) -> String {
        match self.view {
            CalendarView::Month => self.date.format("%B %Y").to_string(),
            CalendarView::Week => self.date.format("%b %-d, %Y").to_string(),
            CalendarView::Day => self.date.format("%A, %b %-d, %Y").to_string(),
        }
    }

    pub fn subtitle(&self) -> String {
        match self.view {
            CalendarView::Month => format!(
                "{} — Monthly schedule overview",
                self.date.format("%B %Y")
            ),
            CalendarView::Week => format!("Week of {}", self.date.format("%b %-d, %Y")),
            CalendarView::Day => format!(
                "Detailed timeline for {}",
                self.date.format("%A, %B %-d")
            ),
        }
    }

    /// Inclusive first and last day rendered by this view
    pub fn visible_range(&self) -> (NaiveDate, NaiveDate) {
        match self.view {
            CalendarView::Month => {
                let first = self.date.with_day(1).unwrap_or(self.date);
                let last = days_in_month(first.year(), first.month())
                    .and_then(|n| first.with_day(n))
                    .unwrap_or(first);
                (start_of_week(first), end_of_week(last))
            }
            CalendarView::Week => (start_of_week(self.date), end_of_week(self.date)),
            CalendarView::Day => (self.date, self.date),
        }
    }

    /// Every day in the visible range, in order
    pub fn visible_days(&self) -> Vec<NaiveDate> {
        let (start, end) = self.visible_range();
        start.iter_days().take_while(|d| *d <= end).collect()
    }
}
