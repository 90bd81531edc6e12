//! Search box plus stacked "Where <column> is <value>" filter rows

use super::TableRow;
use crate::error::{ClinicError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

/// How a column is filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    /// Exact match against one of the options
    Select(Vec<FilterOption>),
    /// Case-insensitive substring match
    Text,
}

/// A column that can be filtered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterColumn {
    pub key: String,
    pub label: String,
    pub kind: FilterKind,
}

impl FilterColumn {
    pub fn text(key: &str, label: &str) -> Self {
        FilterColumn {
            key: key.to_string(),
            label: label.to_string(),
            kind: FilterKind::Text,
        }
    }

    /// Select column whose option labels equal their values
    pub fn select(key: &str, label: &str, values: &[&str]) -> Self {
        let options = values
            .iter()
            .map(|v| FilterOption {
                label: v.to_string(),
                value: v.to_string(),
            })
            .collect();
        FilterColumn::with_options(key, label, options)
    }

    pub fn with_options(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        FilterColumn {
            key: key.to_string(),
            label: label.to_string(),
            kind: FilterKind::Select(options),
        }
    }

    pub fn options(&self) -> &[FilterOption] {
        match &self.kind {
            FilterKind::Select(options) => options,
            FilterKind::Text => &[],
        }
    }
}

/// One active filter row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub column_key: String,
    pub value: String,
}

impl ActiveFilter {
    pub fn new(column_key: &str, value: &str) -> Self {
        ActiveFilter {
            column_key: column_key.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse `key=value` and check it against the available columns
    pub fn parse(raw: &str, columns: &[FilterColumn]) -> Result<Self> {
        let (key, value) = raw.split_once('=').ok_or_else(|| {
            ClinicError::InvalidArgument(format!(
                "filter '{}' must look like key=value",
                raw
            ))
        })?;
        let key = key.trim();
        let value = value.trim();

        let column = columns.iter().find(|c| c.key == key).ok_or_else(|| {
            let keys: Vec<&str> = columns.iter().map(|c| c.key.as_str()).collect();
            ClinicError::InvalidArgument(format!(
                "unknown filter column '{}'. Available: {}",
                key,
                keys.join(", ")
            ))
        })?;

        if let FilterKind::Select(options) = &column.kind {
            // Accept the option label as well as the raw value
            let option = options
                .iter()
                .find(|o| o.value.eq_ignore_ascii_case(value) || o.label.eq_ignore_ascii_case(value))
                .ok_or_else(|| {
                    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                    ClinicError::InvalidArgument(format!(
                        "'{}' is not a valid {}. Options: {}",
                        value,
                        column.label,
                        values.join(", ")
                    ))
                })?;
            return Ok(ActiveFilter::new(key, &option.value));
        }

        Ok(ActiveFilter::new(key, value))
    }

    fn matches<R: TableRow + ?Sized>(&self, row: &R, column: &FilterColumn) -> bool {
        if self.value.is_empty() {
            return true;
        }
        let Some(cell) = row.cell(&column.key) else {
            return false;
        };
        let cell = cell.to_string();
        match column.kind {
            FilterKind::Select(_) => cell == self.value,
            FilterKind::Text => cell.to_lowercase().contains(&self.value.to_lowercase()),
        }
    }
}

/// Search text and filter rows currently applied to a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub filters: Vec<ActiveFilter>,
}

impl FilterState {
    pub fn with_search(search: &str) -> Self {
        FilterState {
            search: search.to_string(),
            filters: Vec::new(),
        }
    }

    pub fn push(&mut self, filter: ActiveFilter) {
        self.filters.push(filter);
    }

    /// Add an empty row on the first column
    pub fn add(&mut self, columns: &[FilterColumn]) {
        if let Some(first) = columns.first() {
            self.filters.push(ActiveFilter::new(&first.key, ""));
        }
    }

    pub fn remove(&mut self, index: usize) {
        if index < self.filters.len() {
            self.filters.remove(index);
        }
    }

    /// Change a row's column; the old value does not carry over
    pub fn set_column(&mut self, index: usize, key: &str) {
        if let Some(filter) = self.filters.get_mut(index) {
            *filter = ActiveFilter::new(key, "");
        }
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(filter) = self.filters.get_mut(index) {
            filter.value = value.to_string();
        }
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    /// Rows with a value; empty rows are ignored when matching
    pub fn active_count(&self) -> usize {
        self.filters.iter().filter(|f| !f.value.is_empty()).count()
    }

    /// Search first, then every non-empty filter row (AND)
    pub fn matches<R: TableRow + ?Sized>(&self, row: &R, columns: &[FilterColumn]) -> bool {
        let needle = self.search.trim().to_lowercase();
        if !needle.is_empty() && !row.matches_search(&needle) {
            return false;
        }

        self.filters.iter().all(|filter| {
            match columns.iter().find(|c| c.key == filter.column_key) {
                Some(column) => filter.matches(row, column),
                None => true,
            }
        })
    }
}
