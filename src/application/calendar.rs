//! Appointments calendar use case

use crate::domain::calendar::{
    events_from_records, CalendarCursor, CalendarView, MonthGrid, TimeGrid,
};
use crate::domain::date_ref::resolve_or_today;
use crate::domain::Records;
use crate::error::{ClinicError, Result};
use crate::infrastructure::{ClinicRepository, Config, FileSystemRepository};
use chrono::NaiveDate;
use std::str::FromStr;

/// What to show: month grid or week/day time grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarBody {
    Month(MonthGrid),
    Grid(TimeGrid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPage {
    pub cursor: CalendarCursor,
    pub body: CalendarBody,
    /// Appointments inside the visible range
    pub visible_events: usize,
}

/// Calendar request as typed on the command line
#[derive(Debug, Clone, Default)]
pub struct CalendarRequest {
    pub view: Option<String>,
    pub date: Option<String>,
    /// Periods to move forward (negative: backward)
    pub step: i32,
}

/// Compose a calendar page from records and settings
pub fn compose(
    records: &Records,
    config: &Config,
    request: &CalendarRequest,
    today: NaiveDate,
) -> Result<CalendarPage> {
    let view = match &request.view {
        Some(raw) => CalendarView::from_str(raw).map_err(ClinicError::InvalidArgument)?,
        None => config.default_view,
    };
    let date = resolve_or_today(request.date.as_deref(), today)?;
    let cursor = CalendarCursor::new(view, date).step(request.step)?;

    let events = events_from_records(records);
    let (first, last) = cursor.visible_range();
    let visible_events = events
        .iter()
        .filter(|e| (first..=last).contains(&e.start.date()))
        .count();

    let body = match view {
        CalendarView::Month => CalendarBody::Month(MonthGrid::build(
            cursor.date,
            &events,
            today,
            config.max_events_visible,
        )),
        CalendarView::Week | CalendarView::Day => CalendarBody::Grid(TimeGrid::build(
            view,
            cursor.date,
            &events,
            &config.time_grid()?,
        )?),
    };

    log::debug!(
        "event=calendar_compose status=ok view={} date={} events={}",
        view,
        cursor.date,
        visible_events
    );

    Ok(CalendarPage {
        cursor,
        body,
        visible_events,
    })
}

/// Service behind `clinicdesk calendar`
pub struct CalendarService {
    repository: FileSystemRepository,
}

impl CalendarService {
    pub fn new(repository: FileSystemRepository) -> Self {
        CalendarService { repository }
    }

    pub fn show(&self, request: &CalendarRequest, today: NaiveDate) -> Result<CalendarPage> {
        let config = self.repository.load_config()?;
        let records = self.repository.load_records()?;
        compose(&records, &config, request, today)
    }
}
