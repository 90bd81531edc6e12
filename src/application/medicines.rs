//! Medicines directory use case

use crate::application::directory::{run_query, DirectoryQuery, TablePage};
use crate::domain::records::{Medicine, Records};
use crate::domain::table::{CellValue, FilterColumn, TableRow};
use crate::error::Result;
use crate::infrastructure::{ClinicRepository, FileSystemRepository};
use chrono::NaiveDate;

pub const SORTABLE_COLUMNS: &[&str] = &["name", "brand", "form", "lastPrescribed", "status"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedicineRow {
    pub name: String,
    pub brand: Option<String>,
    pub form: Option<String>,
    pub last_prescribed: Option<NaiveDate>,
    pub active: bool,
}

impl MedicineRow {
    pub fn status(&self) -> &'static str {
        if self.active {
            "active"
        } else {
            "inactive"
        }
    }
}

impl From<&Medicine> for MedicineRow {
    fn from(m: &Medicine) -> Self {
        MedicineRow {
            name: m.name.clone(),
            brand: m.brand.clone(),
            form: m.form.clone(),
            last_prescribed: m.last_prescribed_date.map(|dt| dt.date()),
            active: m.is_active,
        }
    }
}

impl TableRow for MedicineRow {
    fn cell(&self, key: &str) -> Option<CellValue> {
        match key {
            "name" => Some(CellValue::text(&self.name)),
            "brand" => self.brand.as_deref().map(CellValue::text),
            "form" => self.form.as_deref().map(CellValue::text),
            "lastPrescribed" => self.last_prescribed.map(CellValue::Date),
            "status" => Some(CellValue::text(self.status())),
            _ => None,
        }
    }

    fn matches_search(&self, needle: &str) -> bool {
        [Some(&self.name), self.brand.as_ref(), self.form.as_ref()]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Filter schema: form (from the catalogue), status, name
pub fn filter_columns(records: &Records) -> Vec<FilterColumn> {
    let mut forms: Vec<&str> = records
        .medicines
        .iter()
        .filter_map(|m| m.form.as_deref())
        .collect();
    forms.sort_unstable();
    forms.dedup();

    vec![
        FilterColumn::select("form", "Form", &forms),
        FilterColumn::select("status", "Status", &["active", "inactive"]),
        FilterColumn::text("name", "Name"),
    ]
}

/// Service behind `clinicdesk medicines`
pub struct MedicinesService {
    repository: FileSystemRepository,
}

impl MedicinesService {
    pub fn new(repository: FileSystemRepository) -> Self {
        MedicinesService { repository }
    }

    pub fn list(&self, request: &DirectoryQuery) -> Result<TablePage<MedicineRow>> {
        let config = self.repository.load_config()?;
        let records = self.repository.load_records()?;
        let rows: Vec<MedicineRow> = records.medicines.iter().map(MedicineRow::from).collect();
        run_query(
            &rows,
            &filter_columns(&records),
            SORTABLE_COLUMNS,
            request,
            &config,
        )
    }
}
