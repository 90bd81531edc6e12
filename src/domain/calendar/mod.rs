//! Calendar view composition: month grid and week/day time grid

pub mod month;
pub mod time_grid;
pub mod view;

pub use month::{MonthCell, MonthGrid};
pub use time_grid::{Placement, TimeGrid, TimeGridSettings};
pub use view::{CalendarCursor, CalendarView};

use crate::domain::records::{AppointmentStatus, AppointmentType, Records};
use chrono::NaiveDateTime;
use uuid::Uuid;

/// One appointment as the calendar sees it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub patient_name: String,
    pub doctor_name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub appointment_type: AppointmentType,
    pub status: AppointmentStatus,
}

impl CalendarEvent {
    /// First word of the patient name, as shown on month chips
    pub fn short_name(&self) -> &str {
        self.patient_name
            .split_whitespace()
            .next()
            .unwrap_or(&self.patient_name)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Active appointments of a clinic, sorted by start time
pub fn events_from_records(records: &Records) -> Vec<CalendarEvent> {
    let mut events: Vec<CalendarEvent> = records
        .appointments
        .iter()
        .filter(|a| a.is_active)
        .map(|a| CalendarEvent {
            id: a.id,
            patient_name: records.patient_name(a.patient_id),
            doctor_name: records.user_name(&a.doctor_id),
            start: a.date,
            end: a.end(),
            appointment_type: a.appointment_type,
            status: a.status,
        })
        .collect();
    events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
    events
}
