//! Shared plumbing for the table pages: parse the CLI query, then search,
//! filter, sort and paginate

use crate::domain::table::{
    query, ActiveFilter, FilterColumn, FilterState, Pagination, SortState, TableRow,
};
use crate::error::Result;
use crate::infrastructure::Config;

/// Table query as typed on the command line
#[derive(Debug, Clone, Default)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    /// Raw `key=value` filter rows
    pub filters: Vec<String>,
    /// Raw `column[:asc|desc]`
    pub sort: Option<String>,
    pub page: usize,
    /// Falls back to the configured page size
    pub page_size: Option<usize>,
}

/// One rendered page of a table
#[derive(Debug, Clone)]
pub struct TablePage<R> {
    pub rows: Vec<R>,
    pub pagination: Pagination,
    pub sort: SortState,
    pub filters: FilterState,
}

impl<R> TablePage<R> {
    /// Number of rows matching the query across all pages
    pub fn matched(&self) -> usize {
        self.pagination.total_rows
    }
}

/// Run a directory query over materialised rows
pub fn run_query<R: TableRow + Clone>(
    rows: &[R],
    columns: &[FilterColumn],
    sortable: &[&str],
    request: &DirectoryQuery,
    config: &Config,
) -> Result<TablePage<R>> {
    let mut filters = FilterState::with_search(request.search.as_deref().unwrap_or(""));
    for raw in &request.filters {
        filters.push(ActiveFilter::parse(raw, columns)?);
    }

    let sort = match &request.sort {
        Some(raw) => SortState::parse(raw, sortable)?,
        None => SortState::default(),
    };

    let matched = query(rows, columns, &filters, &sort);
    let pagination = Pagination::new(
        request.page,
        request.page_size.unwrap_or(config.page_size),
        matched.len(),
    )?
    .with_max_chips(config.max_page_chips);

    let rows = pagination.slice(&matched).iter().map(|r| (*r).clone()).collect();
    log::debug!(
        "event=table_query status=ok matched={} page={} filters={}",
        pagination.total_rows,
        pagination.page,
        filters.active_count()
    );

    Ok(TablePage {
        rows,
        pagination,
        sort,
        filters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::test_support::rows;
    use crate::error::ClinicError;

    fn columns() -> Vec<FilterColumn> {
        vec![
            FilterColumn::select("status", "Status", &["active", "inactive", "critical"]),
            FilterColumn::text("name", "Name"),
        ]
    }

    fn request() -> DirectoryQuery {
        DirectoryQuery {
            page: 1,
            ..DirectoryQuery::default()
        }
    }

    #[test]
    fn test_uses_configured_page_size() {
        let mut config = Config::new();
        config.page_size = 2;
        let page = run_query(&rows(), &columns(), &["name"], &request(), &config).unwrap();
        assert_eq!(page.rows.len(), 2);
        assert_eq!(page.matched(), 5);
        assert_eq!(page.pagination.total_pages(), 3);
    }

    #[test]
    fn test_filter_sort_and_page_together() {
        let req = DirectoryQuery {
            filters: vec!["status=active".to_string()],
            sort: Some("name:desc".to_string()),
            page: 1,
            page_size: Some(2),
            ..DirectoryQuery::default()
        };
        let page = run_query(&rows(), &columns(), &["name"], &req, &Config::new()).unwrap();
        let names: Vec<&str> = page.rows.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Robert Brown", "Michael Ross"]);
        assert_eq!(page.matched(), 3);
    }

    #[test]
    fn test_bad_input_is_an_argument_error() {
        let config = Config::new();
        let bad_filter = DirectoryQuery {
            filters: vec!["ward=3".to_string()],
            ..request()
        };
        assert!(matches!(
            run_query(&rows(), &columns(), &["name"], &bad_filter, &config),
            Err(ClinicError::InvalidArgument(_))
        ));

        let bad_page = DirectoryQuery {
            page: 0,
            ..DirectoryQuery::default()
        };
        assert!(run_query(&rows(), &columns(), &["name"], &bad_page, &config).is_err());
    }
}
