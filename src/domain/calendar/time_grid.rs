//! Week and day time grid
//!
//! Columns are days, rows are fixed-length slots between `day_start` and
//! `day_end`. Appointments are placed on the slots they overlap and clipped
//! to the visible window.

use super::view::{CalendarCursor, CalendarView};
use super::CalendarEvent;
use crate::error::{ClinicError, Result};
use chrono::{Duration, NaiveDate, NaiveTime, Timelike};

/// Cards shorter than this only show the patient name
pub const COMPACT_THRESHOLD_MINUTES: i64 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGridSettings {
    pub day_start: NaiveTime,
    pub day_end: NaiveTime,
    pub slot_minutes: u32,
}

impl Default for TimeGridSettings {
    fn default() -> Self {
        TimeGridSettings {
            day_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or_default(),
            day_end: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            slot_minutes: 30,
        }
    }
}

impl TimeGridSettings {
    pub fn validate(&self) -> Result<()> {
        if self.slot_minutes == 0 || self.slot_minutes > 240 {
            return Err(ClinicError::Config(format!(
                "slot_minutes must be between 1 and 240, got {}",
                self.slot_minutes
            )));
        }
        if self.day_end <= self.day_start {
            return Err(ClinicError::Config(format!(
                "day_end ({}) must be after day_start ({})",
                self.day_end.format("%H:%M"),
                self.day_start.format("%H:%M")
            )));
        }
        Ok(())
    }

    fn window_minutes(&self) -> i64 {
        (self.day_end - self.day_start).num_minutes()
    }

    /// Start time of every slot row
    pub fn slots(&self) -> Vec<NaiveTime> {
        let slot = i64::from(self.slot_minutes.max(1));
        (0..)
            .map(|i| i * slot)
            .take_while(|offset| *offset < self.window_minutes())
            .map(|offset| self.day_start + Duration::minutes(offset))
            .collect()
    }
}

/// An appointment positioned on the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub event: CalendarEvent,
    pub day_index: usize,
    pub first_slot: usize,
    pub span: usize,
    pub compact: bool,
    /// Part of the appointment falls outside the visible hours
    pub clipped: bool,
}

impl Placement {
    /// "09:00 - 09:30"
    pub fn time_text(&self) -> String {
        format!(
            "{} - {}",
            self.event.start.format("%H:%M"),
            self.event.end.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    pub view: CalendarView,
    pub days: Vec<NaiveDate>,
    pub slots: Vec<NaiveTime>,
    pub placements: Vec<Placement>,
    /// Appointments on visible days that lie entirely outside the hours
    pub hidden: usize,
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.num_seconds_from_midnight()) / 60
}

impl TimeGrid {
    pub fn build(
        view: CalendarView,
        date: NaiveDate,
        events: &[CalendarEvent],
        settings: &TimeGridSettings,
    ) -> Result<Self> {
        if view == CalendarView::Month {
            return Err(ClinicError::InvalidArgument(
                "time grid supports week and day views only".to_string(),
            ));
        }
        settings.validate()?;

        let days = CalendarCursor::new(view, date).visible_days();
        let slot = i64::from(settings.slot_minutes);
        let window_start = minute_of_day(settings.day_start);
        let window_end = minute_of_day(settings.day_end);

        let mut placements = Vec::new();
        let mut hidden = 0;

        for event in events {
            let Some(day_index) = days.iter().position(|d| *d == event.start.date()) else {
                continue;
            };

            let start = minute_of_day(event.start.time());
            // Appointments running past midnight end at the close of their day
            let end = if event.end.date() > event.start.date() {
                24 * 60
            } else {
                minute_of_day(event.end.time())
            };

            let visible_start = start.max(window_start);
            let visible_end = end.min(window_end);
            if visible_end <= visible_start {
                hidden += 1;
                continue;
            }

            let first_slot = (visible_start - window_start) / slot;
            let last_slot = (visible_end - window_start + slot - 1) / slot;
            placements.push(Placement {
                event: event.clone(),
                day_index,
                first_slot: first_slot as usize,
                span: (last_slot - first_slot).max(1) as usize,
                compact: event.duration_minutes() < COMPACT_THRESHOLD_MINUTES,
                clipped: visible_start != start || visible_end != end,
            });
        }

        placements.sort_by(|a, b| {
            (a.day_index, a.first_slot, a.event.start).cmp(&(b.day_index, b.first_slot, b.event.start))
        });

        Ok(TimeGrid {
            view,
            days,
            slots: settings.slots(),
            placements,
            hidden,
        })
    }

    /// Column header for a day
    pub fn day_header(&self, day: NaiveDate) -> String {
        match self.view {
            CalendarView::Day => day.format("%A, %B %-d").to_string(),
            _ => day.format("%a %-d").to_string(),
        }
    }

    /// Placements that start in the given slot of the given day
    pub fn starting_at(&self, day_index: usize, slot: usize) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(move |p| p.day_index == day_index && p.first_slot == slot)
    }
}
