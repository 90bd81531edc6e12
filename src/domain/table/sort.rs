//! Column sorting

use super::TableRow;
use crate::error::{ClinicError, Result};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sorted column, or none for insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn by(column: &str, direction: SortDirection) -> Self {
        SortState {
            column: Some(column.to_string()),
            direction: Some(direction),
        }
    }

    /// Parse `column` or `column:asc|desc`, checking the column is sortable
    pub fn parse(raw: &str, sortable: &[&str]) -> Result<Self> {
        let (column, direction) = match raw.split_once(':') {
            Some((column, dir)) => {
                let direction = match dir.trim().to_lowercase().as_str() {
                    "asc" => SortDirection::Ascending,
                    "desc" => SortDirection::Descending,
                    other => {
                        return Err(ClinicError::InvalidArgument(format!(
                            "sort direction '{}' must be asc or desc",
                            other
                        )))
                    }
                };
                (column.trim(), direction)
            }
            None => (raw.trim(), SortDirection::Ascending),
        };

        if !sortable.contains(&column) {
            return Err(ClinicError::InvalidArgument(format!(
                "cannot sort by '{}'. Sortable columns: {}",
                column,
                sortable.join(", ")
            )));
        }
        Ok(SortState::by(column, direction))
    }

    /// Header click: none → ascending → descending → none.
    /// Clicking a different column starts it at ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() != Some(column) {
            *self = SortState::by(column, SortDirection::Ascending);
            return;
        }
        *self = match self.direction {
            None => SortState::by(column, SortDirection::Ascending),
            Some(SortDirection::Ascending) => SortState::by(column, SortDirection::Descending),
            Some(SortDirection::Descending) => SortState::default(),
        };
    }

    /// Direction for a column header indicator
    pub fn direction_for(&self, column: &str) -> Option<SortDirection> {
        if self.column.as_deref() == Some(column) {
            self.direction
        } else {
            None
        }
    }

    /// Stable sort; rows without the cell go last in either direction
    pub fn apply<R: TableRow + ?Sized>(&self, rows: &mut [&R]) {
        let (Some(column), Some(direction)) = (self.column.as_deref(), self.direction) else {
            return;
        };
        rows.sort_by(|a, b| match (a.cell(column), b.cell(column)) {
            (Some(x), Some(y)) => match direction {
                SortDirection::Ascending => x.cmp(&y),
                SortDirection::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
    }
}
