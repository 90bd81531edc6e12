//! Month grid: whole weeks of day cells with event chips

use super::view::{CalendarCursor, CalendarView};
use super::CalendarEvent;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Chips shown per day before collapsing into "+N more"
pub const DEFAULT_MAX_EVENTS_VISIBLE: usize = 3;

/// Day-of-week header, Sunday first
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<CalendarEvent>,
    pub overflow: usize,
}

impl MonthCell {
    /// Chip text: "HH:MM · FirstName"
    pub fn chip_labels(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|e| format!("{} · {}", e.start.format("%H:%M"), e.short_name()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[MonthCell; 7]>,
}

impl MonthGrid {
    /// Lay out the month containing `date`
    pub fn build(
        date: NaiveDate,
        events: &[CalendarEvent],
        today: NaiveDate,
        max_visible: usize,
    ) -> Self {
        let cursor = CalendarCursor::new(CalendarView::Month, date);

        let mut by_day: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
        for event in events {
            by_day.entry(event.start.date()).or_default().push(event);
        }

        let cells: Vec<MonthCell> = cursor
            .visible_days()
            .into_iter()
            .map(|day| {
                let mut todays = by_day.get(&day).cloned().unwrap_or_default();
                todays.sort_by_key(|e| e.start);
                let overflow = todays.len().saturating_sub(max_visible);
                MonthCell {
                    date: day,
                    in_current_month: day.month() == date.month() && day.year() == date.year(),
                    is_today: day == today,
                    events: todays.into_iter().take(max_visible).cloned().collect(),
                    overflow,
                }
            })
            .collect();

        let weeks = cells
            .chunks(7)
            .filter_map(|chunk| <[MonthCell; 7]>::try_from(chunk.to_vec()).ok())
            .collect();

        MonthGrid {
            year: date.year(),
            month: date.month(),
            weeks,
        }
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.weeks.iter().flatten().find(|c| c.date == date)
    }
}
