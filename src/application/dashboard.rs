//! Home dashboard use case: stat cards, today's schedule, recent activity

use crate::domain::records::{AppointmentStatus, DocumentOwner, Records};
use crate::domain::table::pagination::group_thousands;
use crate::domain::AppStatus;
use crate::error::Result;
use crate::infrastructure::{ClinicRepository, FileSystemRepository};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Entries shown in the activity log
pub const ACTIVITY_LIMIT: usize = 8;
const GROWTH_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    /// "+12%" or "-2%"
    pub delta: Option<String>,
    pub positive: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    /// "09:00 AM"
    pub time: String,
    pub patient: String,
    pub visit_type: String,
    pub doctor: String,
    pub status: AppStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub title: String,
    pub body: String,
    /// "12 min ago", "Yesterday"
    pub time: String,
    pub unread: bool,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    pub date: NaiveDate,
    pub cards: Vec<StatCard>,
    pub schedule: Vec<ScheduleRow>,
    pub activity: Vec<LogEvent>,
}

/// "+12%" style change; `None` when there is nothing to compare against
fn percent_delta(current: usize, previous: usize) -> Option<(String, bool)> {
    if previous == 0 {
        return None;
    }
    let change = (current as f64 - previous as f64) * 100.0 / previous as f64;
    let rounded = change.round() as i64;
    let text = if rounded >= 0 {
        format!("+{}%", rounded)
    } else {
        format!("{}%", rounded)
    };
    Some((text, current >= previous))
}

fn card(label: &'static str, value: usize, delta: Option<(String, bool)>) -> StatCard {
    let (delta, positive) = match delta {
        Some((text, positive)) => (Some(text), positive),
        None => (None, true),
    };
    StatCard {
        label,
        value: group_thousands(value),
        delta,
        positive,
    }
}

/// Human-readable age of an event
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - at;
    if elapsed < Duration::minutes(1) {
        return "Just now".to_string();
    }
    if elapsed < Duration::hours(1) {
        return format!("{} min ago", elapsed.num_minutes());
    }
    if elapsed < Duration::days(1) {
        let hours = elapsed.num_hours();
        return if hours == 1 {
            "1 hr ago".to_string()
        } else {
            format!("{} hrs ago", hours)
        };
    }
    match (now.date_naive() - at.date_naive()).num_days() {
        0 | 1 => "Yesterday".to_string(),
        days => format!("{} days ago", days),
    }
}

fn stat_cards(records: &Records, date: NaiveDate, now: DateTime<Utc>) -> Vec<StatCard> {
    let patients: Vec<_> = records.patients.iter().filter(|p| p.is_active).collect();
    let growth_start = now - Duration::days(GROWTH_WINDOW_DAYS);
    let new_patients = patients
        .iter()
        .filter(|p| p.created_at > growth_start)
        .count();

    let appointments_on = |day: NaiveDate| {
        records
            .appointments
            .iter()
            .filter(|a| a.is_active && a.date.date() == day)
            .count()
    };
    let today_count = appointments_on(date);
    let last_week_count = appointments_on(date - Duration::days(7));

    let pending = records
        .appointments
        .iter()
        .filter(|a| {
            a.is_active && a.status == AppointmentStatus::Pending && a.date.date() >= date
        })
        .count();
    let active_medicines = records.medicines.iter().filter(|m| m.is_active).count();

    vec![
        card(
            "Total Patients",
            patients.len(),
            percent_delta(patients.len(), patients.len() - new_patients),
        ),
        card(
            "Appointments Today",
            today_count,
            percent_delta(today_count, last_week_count),
        ),
        card("Pending Appointments", pending, None),
        card("Active Medicines", active_medicines, None),
    ]
}

fn schedule(records: &Records, date: NaiveDate) -> Vec<ScheduleRow> {
    let mut todays: Vec<_> = records
        .appointments
        .iter()
        .filter(|a| a.is_active && a.date.date() == date)
        .collect();
    todays.sort_by_key(|a| a.date);
    todays
        .into_iter()
        .map(|a| ScheduleRow {
            time: a.date.format("%I:%M %p").to_string(),
            patient: records.patient_name(a.patient_id),
            visit_type: a.appointment_type.label().to_string(),
            doctor: records.user_name(&a.doctor_id),
            status: AppStatus::from(a.status),
        })
        .collect()
}

fn activity(records: &Records, now: DateTime<Utc>) -> Vec<LogEvent> {
    let mut raw: Vec<(DateTime<Utc>, String, String)> = Vec::new();

    for p in &records.patients {
        raw.push((
            p.created_at,
            "New patient".to_string(),
            format!("{} added to the directory.", p.full_name()),
        ));
    }
    for a in &records.appointments {
        let patient = records.patient_name(a.patient_id);
        raw.push((
            a.created_at,
            "Appointment booked".to_string(),
            format!(
                "{} with {} on {}.",
                patient,
                records.user_name(&a.doctor_id),
                a.date.format("%b %-d, %H:%M")
            ),
        ));
        if a.status != AppointmentStatus::Pending && a.updated_at > a.created_at {
            raw.push((
                a.updated_at,
                format!("Appointment {}", AppStatus::from(a.status).label().to_lowercase()),
                format!("{} · {}", patient, a.title),
            ));
        }
    }
    for d in &records.documents {
        let owner = match &d.owner {
            DocumentOwner::Patient(id) => records.patient_name(*id),
            DocumentOwner::User(id) => records.user_name(id),
        };
        raw.push((
            d.created_at,
            "Document uploaded".to_string(),
            format!("{} for {}.", d.title, owner),
        ));
    }
    for m in &records.medicines {
        raw.push((
            m.created_at,
            "Medicine added".to_string(),
            format!("{} added to the formulary.", m.name),
        ));
    }

    raw.retain(|(at, _, _)| *at <= now);
    raw.sort_by(|a, b| b.0.cmp(&a.0));
    raw.into_iter()
        .take(ACTIVITY_LIMIT)
        .map(|(at, title, body)| LogEvent {
            title,
            body,
            time: relative_time(at, now),
            unread: now - at < Duration::hours(1),
            at,
        })
        .collect()
}

/// Compose the dashboard for `date`, with activity ages measured from `now`
pub fn compose(records: &Records, date: NaiveDate, now: DateTime<Utc>) -> Dashboard {
    Dashboard {
        date,
        cards: stat_cards(records, date, now),
        schedule: schedule(records, date),
        activity: activity(records, now),
    }
}

/// Service behind `clinicdesk dashboard`
pub struct DashboardService {
    repository: FileSystemRepository,
}

impl DashboardService {
    pub fn new(repository: FileSystemRepository) -> Self {
        DashboardService { repository }
    }

    pub fn show(&self, date: NaiveDate, now: DateTime<Utc>) -> Result<Dashboard> {
        let records = self.repository.load_records()?;
        Ok(compose(&records, date, now))
    }
}
