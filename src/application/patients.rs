//! Patients directory use case

use crate::application::directory::{run_query, DirectoryQuery, TablePage};
use crate::domain::records::{PatientStatus, Records};
use crate::domain::table::{CellValue, FilterColumn, FilterOption, TableRow};
use crate::domain::AppStatus;
use crate::error::Result;
use crate::infrastructure::{ClinicRepository, FileSystemRepository};
use chrono::NaiveDate;

/// Columns the directory can be sorted by
pub const SORTABLE_COLUMNS: &[&str] = &["name", "chartId", "lastVisit", "assignedDoctor", "status"];

/// One line of the patients directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    pub chart_id: u32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub last_visit: Option<NaiveDate>,
    pub assigned_doctor: Option<String>,
    pub status: PatientStatus,
}

impl TableRow for PatientRow {
    fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "name" => Some(CellValue::text(&self.name)),
            "chartId" => Some(CellValue::Number(i64::from(self.chart_id))),
            "lastVisit" => self.last_visit.map(CellValue::Date),
            "assignedDoctor" => self.assigned_doctor.as_deref().map(CellValue::text),
            "status" => Some(CellValue::text(self.status.as_str())),
            "email" => self.email.as_deref().map(CellValue::text),
            _ => None,
        }
    }

    // Name and chart id ignore case; phone digits are matched as typed
    fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.chart_id.to_string().contains(needle)
            || self.phone.as_deref().is_some_and(|p| p.contains(needle))
    }
}

/// Build directory rows for every active patient
pub fn patient_rows(records: &Records) -> Vec<PatientRow> {
    records
        .patients
        .iter()
        .filter(|p| p.is_active)
        .map(|p| PatientRow {
            chart_id: p.chart_id,
            name: p.full_name(),
            email: p.email.clone(),
            phone: p.phone.clone(),
            last_visit: records.last_visit(p.id).map(|dt| dt.date()),
            assigned_doctor: p
                .assigned_doctor_id
                .as_deref()
                .map(|id| records.user_name(id)),
            status: p.status,
        })
        .collect()
}

/// Filter schema: status, assigned doctor, name
pub fn filter_columns(records: &Records) -> Vec<FilterColumn> {
    let statuses = PatientStatus::ALL
        .iter()
        .map(|s| FilterOption {
            label: AppStatus::from(*s).label().to_string(),
            value: s.as_str().to_string(),
        })
        .collect();

    let mut doctor_names: Vec<String> = records.doctors().map(|d| d.name.clone()).collect();
    doctor_names.sort();
    doctor_names.dedup();
    let doctors = doctor_names
        .into_iter()
        .map(|name| FilterOption {
            label: name.clone(),
            value: name,
        })
        .collect();

    vec![
        FilterColumn::with_options("status", "Status", statuses),
        FilterColumn::with_options("assignedDoctor", "Assigned Doctor", doctors),
        FilterColumn::text("name", "Name"),
    ]
}

/// Service behind `clinicdesk patients`
pub struct PatientsService {
    repository: FileSystemRepository,
}

impl PatientsService {
    pub fn new(repository: FileSystemRepository) -> Self {
        PatientsService { repository }
    }

    pub fn list(&self, request: &DirectoryQuery) -> Result<TablePage<PatientRow>> {
        let config = self.repository.load_config()?;
        let records = self.repository.load_records()?;
        let rows = patient_rows(&records);
        run_query(
            &rows,
            &filter_columns(&records),
            SORTABLE_COLUMNS,
            request,
            &config,
        )
    }
}
