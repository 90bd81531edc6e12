//! Generic, column-driven table components
//!
//! Rows only have to say how to read a cell by key. Filtering, sorting and
//! pagination are then shared by every directory page.

pub mod filter;
pub mod pagination;
pub mod sort;

pub use filter::{ActiveFilter, FilterColumn, FilterKind, FilterOption, FilterState};
pub use pagination::{PageChip, Pagination};
pub use sort::{SortDirection, SortState};

use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

/// A typed cell value; ordering follows the natural order of each type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Number(i64),
    Date(NaiveDate),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Number(_) => 0,
            CellValue::Date(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (CellValue::Text(a), CellValue::Text(b)) => a
                .to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b)),
            (CellValue::Number(a), CellValue::Number(b)) => a.cmp(b),
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%b %d, %Y")),
        }
    }
}

/// A row that can be filtered, searched and sorted
pub trait TableRow {
    /// Read a cell by column key
    fn cell(&self, key: &str) -> Option<CellValue>;

    /// Free-text search; `needle` is already lowercased and non-empty
    fn matches_search(&self, needle: &str) -> bool;
}

/// Search, filter and sort rows, returning the full result set in order
pub fn query<'a, R: TableRow>(
    rows: &'a [R],
    columns: &[FilterColumn],
    state: &FilterState,
    sort: &SortState,
) -> Vec<&'a R> {
    let mut matched: Vec<&R> = rows
        .iter()
        .filter(|row| state.matches(*row, columns))
        .collect();
    sort.apply(&mut matched);
    matched
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{CellValue, TableRow};

    /// Minimal patient-like row
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Row {
        pub name: &'static str,
        pub status: &'static str,
        pub chart: i64,
    }

    impl TableRow for Row {
        fn cell(&self, key: &str) -> Option<CellValue> {
            match key {
                "name" => Some(CellValue::text(self.name)),
                "status" => Some(CellValue::text(self.status)),
                "chart" => Some(CellValue::Number(self.chart)),
                _ => None,
            }
        }

        fn matches_search(&self, needle: &str) -> bool {
            self.name.to_lowercase().contains(needle) || self.chart.to_string().contains(needle)
        }
    }

    pub fn rows() -> Vec<Row> {
        vec![
            Row { name: "Michael Ross", status: "active", chart: 8821 },
            Row { name: "Emma Watson", status: "active", chart: 8822 },
            Row { name: "John Doe", status: "inactive", chart: 8790 },
            Row { name: "Alice Wong", status: "critical", chart: 8805 },
            Row { name: "Robert Brown", status: "active", chart: 8810 },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::rows;
    use super::*;

    #[test]
    fn test_cell_value_ordering() {
        assert!(CellValue::text("alice") < CellValue::text("Bob"));
        assert!(CellValue::Number(9) < CellValue::Number(10));
        let a = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert!(CellValue::Date(a) < CellValue::Date(b));
    }

    #[test]
    fn test_query_filters_then_sorts() {
        let data = rows();
        let columns = vec![FilterColumn::select("status", "Status", &["active", "inactive", "critical"])];
        let mut state = FilterState::default();
        state.push(ActiveFilter::new("status", "active"));
        let sort = SortState::by("chart", SortDirection::Descending);

        let result = query(&data, &columns, &state, &sort);
        let charts: Vec<i64> = result.iter().map(|r| r.chart).collect();
        assert_eq!(charts, vec![8822, 8821, 8810]);
    }
}
