//! Output formatting utilities

use crate::application::dashboard::{Dashboard, LogEvent, StatCard};
use crate::application::{MedicineRow, PatientRow, Report, TablePage};
use crate::domain::table::{FilterState, PageChip, Pagination, SortDirection, SortState};
use crate::domain::{initials, AppStatus};
use crate::infrastructure::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Column definition for [`render_table`]
#[derive(Debug, Clone, Copy)]
pub struct TableColumn {
    /// Sort key, matched against the active [`SortState`]
    pub key: &'static str,
    pub header: &'static str,
    pub align: Align,
}

impl TableColumn {
    pub const fn left(key: &'static str, header: &'static str) -> Self {
        TableColumn {
            key,
            header,
            align: Align::Left,
        }
    }

    pub const fn right(key: &'static str, header: &'static str) -> Self {
        TableColumn {
            key,
            header,
            align: Align::Right,
        }
    }
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, w: usize, align: Align) -> String {
    let fill = " ".repeat(w.saturating_sub(width(s)));
    match align {
        Align::Left => format!("{}{}", s, fill),
        Align::Right => format!("{}{}", fill, s),
    }
}

/// Cut to `max` characters, marking the cut with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Render a column-driven table; widths follow the widest cell
pub fn render_table(
    columns: &[TableColumn],
    rows: &[Vec<String>],
    sort: &SortState,
    empty_message: &str,
) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|c| match sort.direction_for(c.key) {
            Some(SortDirection::Ascending) => format!("{} ▲", c.header),
            Some(SortDirection::Descending) => format!("{} ▼", c.header),
            None => c.header.to_string(),
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|cell| width(cell))
                .chain(std::iter::once(width(h)))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        columns
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (col, w))| pad(cells.get(i).map(String::as_str).unwrap_or(""), *w, col.align))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut output = String::new();
    output.push_str(&line(&headers[..]));
    output.push('\n');
    let total_width = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    output.push_str(&"─".repeat(total_width));
    output.push('\n');

    if rows.is_empty() {
        output.push_str(empty_message);
        output.push('\n');
        return output;
    }
    for row in rows {
        output.push_str(&line(&row[..]));
        output.push('\n');
    }
    output
}

/// Summary line plus the page chip strip
pub fn render_pagination(pagination: &Pagination, entity_label: &str) -> String {
    let chips: Vec<String> = pagination
        .chips()
        .into_iter()
        .map(|chip| match chip {
            PageChip::Page { number, current: true } => format!("[{}]", number),
            PageChip::Page { number, .. } => number.to_string(),
            PageChip::Ellipsis => "…".to_string(),
        })
        .collect();

    let prev = if pagination.has_previous() { "‹ Prev" } else { "  " };
    let next = if pagination.has_next() { "Next ›" } else { "" };
    format!(
        "{}\n{}  {}  {}",
        pagination.summary(entity_label),
        prev,
        chips.join(" "),
        next
    )
    .trim_end()
    .to_string()
}

/// "Filters: status = active, name ~ ro" line, or nothing
fn render_filters(filters: &FilterState) -> Option<String> {
    let mut parts = Vec::new();
    if !filters.search.trim().is_empty() {
        parts.push(format!("search \"{}\"", filters.search.trim()));
    }
    for f in filters.filters.iter().filter(|f| !f.value.is_empty()) {
        parts.push(format!("{} = {}", f.column_key, f.value));
    }
    if parts.is_empty() {
        None
    } else {
        Some(format!("Filters: {}", parts.join(", ")))
    }
}

fn page_header(title: &str, subtitle: &str) -> String {
    format!("{}\n{}\n\n", title, subtitle)
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%b %d, %Y").to_string())
        .unwrap_or_else(|| "-".to_string())
}

const PATIENT_COLUMNS: [TableColumn; 5] = [
    TableColumn::left("name", "Patient"),
    TableColumn::right("chartId", "Chart ID"),
    TableColumn::left("lastVisit", "Last Visit"),
    TableColumn::left("assignedDoctor", "Assigned Dr."),
    TableColumn::left("status", "Status"),
];

/// Patients directory page
pub fn format_patients(page: &TablePage<PatientRow>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|p| {
            let mut who = format!("({}) {}", initials(&p.name), p.name);
            if let Some(email) = &p.email {
                who.push_str(&format!(" <{}>", email));
            }
            vec![
                who,
                format!("#{}", p.chart_id),
                date_or_dash(p.last_visit),
                p.assigned_doctor.clone().unwrap_or_else(|| "-".to_string()),
                AppStatus::from(p.status).label().to_string(),
            ]
        })
        .collect();

    let mut output = page_header(
        "Patients Directory",
        "Manage patient records, history, and active treatments.",
    );
    if let Some(line) = render_filters(&page.filters) {
        output.push_str(&line);
        output.push('\n');
    }
    output.push_str(&render_table(
        &PATIENT_COLUMNS,
        &rows,
        &page.sort,
        "No patients match your search or filters.",
    ));
    output.push('\n');
    output.push_str(&render_pagination(&page.pagination, "patient"));
    output
}

const MEDICINE_COLUMNS: [TableColumn; 5] = [
    TableColumn::left("name", "Medicine"),
    TableColumn::left("brand", "Brand"),
    TableColumn::left("form", "Form"),
    TableColumn::left("lastPrescribed", "Last Prescribed"),
    TableColumn::left("status", "Status"),
];

/// Medicines directory page
pub fn format_medicines(page: &TablePage<MedicineRow>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|m| {
            vec![
                m.name.clone(),
                m.brand.clone().unwrap_or_else(|| "-".to_string()),
                m.form.clone().unwrap_or_else(|| "-".to_string()),
                date_or_dash(m.last_prescribed),
                AppStatus::from_str_lossy(m.status()).label().to_string(),
            ]
        })
        .collect();

    let mut output = page_header("Medicines", "Formulary and prescribing history.");
    if let Some(line) = render_filters(&page.filters) {
        output.push_str(&line);
        output.push('\n');
    }
    output.push_str(&render_table(
        &MEDICINE_COLUMNS,
        &rows,
        &page.sort,
        "No medicines match your search or filters.",
    ));
    output.push('\n');
    output.push_str(&render_pagination(&page.pagination, "medicine"));
    output
}

fn format_card(card: &StatCard) -> String {
    match &card.delta {
        Some(delta) => {
            let trend = if card.positive { "↑" } else { "↓" };
            format!("{}: {} ({} {})", card.label, card.value, trend, delta)
        }
        None => format!("{}: {}", card.label, card.value),
    }
}

fn format_event(event: &LogEvent) -> String {
    let dot = if event.unread { "●" } else { "○" };
    format!(
        "{} {} ({})\n    {}",
        dot, event.title, event.time, event.body
    )
}

/// Home dashboard page
pub fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut output = page_header(
        "Dashboard",
        &format!("Overview for {}", dashboard.date.format("%A, %B %-d, %Y")),
    );

    for card in &dashboard.cards {
        output.push_str(&format_card(card));
        output.push('\n');
    }

    output.push_str("\nToday's Schedule\n");
    let rows: Vec<Vec<String>> = dashboard
        .schedule
        .iter()
        .map(|r| {
            vec![
                r.time.clone(),
                r.patient.clone(),
                r.visit_type.clone(),
                r.doctor.clone(),
                r.status.label().to_string(),
            ]
        })
        .collect();
    output.push_str(&render_table(
        &[
            TableColumn::left("time", "Time"),
            TableColumn::left("patient", "Patient"),
            TableColumn::left("type", "Visit Type"),
            TableColumn::left("doctor", "Doctor"),
            TableColumn::left("status", "Status"),
        ],
        &rows,
        &SortState::default(),
        "No appointments scheduled.",
    ));

    output.push_str("\nRecent Activity\n");
    if dashboard.activity.is_empty() {
        output.push_str("No recent activity.\n");
    }
    for event in &dashboard.activity {
        output.push_str(&format_event(event));
        output.push('\n');
    }
    output
}

/// Report page: headline metrics then one table per breakdown
pub fn format_report(report: &Report) -> String {
    let mut output = page_header(report.title, report.subtitle);

    let label_width = report
        .metrics
        .iter()
        .map(|(label, _)| width(label))
        .max()
        .unwrap_or(0);
    for (label, value) in &report.metrics {
        output.push_str(&format!("{}  {}\n", pad(label, label_width, Align::Left), value));
    }

    for breakdown in &report.breakdowns {
        output.push_str(&format!("\n{}\n", breakdown.title));
        let total = breakdown.total();
        let rows: Vec<Vec<String>> = breakdown
            .rows
            .iter()
            .map(|(label, count)| {
                let share = if total == 0 {
                    0.0
                } else {
                    *count as f64 * 100.0 / total as f64
                };
                vec![label.clone(), count.to_string(), format!("{:.0}%", share)]
            })
            .collect();
        output.push_str(&render_table(
            &[
                TableColumn::left("label", "Group"),
                TableColumn::right("count", "Count"),
                TableColumn::right("share", "Share"),
            ],
            &rows,
            &SortState::default(),
            "No data.",
        ));
    }
    output
}

/// `config --list` output
pub fn format_config(config: &Config) -> String {
    [
        format!("page_size = {}", config.page_size),
        format!("max_page_chips = {}", config.max_page_chips),
        format!("default_view = {}", config.default_view),
        format!("max_events_visible = {}", config.max_events_visible),
        format!("day_start = {}", config.day_start),
        format!("day_end = {}", config.day_end),
        format!("slot_minutes = {}", config.slot_minutes),
        format!("created = {}", config.created.to_rfc3339()),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::records::PatientStatus;
    use chrono::NaiveDate;

    fn columns() -> Vec<TableColumn> {
        vec![
            TableColumn::left("name", "Name"),
            TableColumn::right("chart", "Chart"),
        ]
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = vec![
            vec!["Emma Watson".to_string(), "8822".to_string()],
            vec!["Al".to_string(), "7".to_string()],
        ];
        let out = render_table(&columns(), &rows, &SortState::default(), "none");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name         Chart");
        assert_eq!(lines[2], "Emma Watson   8822");
        assert_eq!(lines[3], "Al               7");
    }

    #[test]
    fn test_render_table_sort_indicator() {
        let rows = vec![vec!["Al".to_string(), "7".to_string()]];
        let asc = render_table(&columns(), &rows, &SortState::by("chart", SortDirection::Ascending), "");
        assert!(asc.lines().next().unwrap().ends_with("Chart ▲"));
        let desc = render_table(&columns(), &rows, &SortState::by("name", SortDirection::Descending), "");
        assert!(desc.starts_with("Name ▼"));
    }

    #[test]
    fn test_render_table_empty_state() {
        let out = render_table(&columns(), &[], &SortState::default(), "No patients found.");
        assert!(out.ends_with("No patients found.\n"));
    }

    #[test]
    fn test_render_pagination() {
        let p = Pagination::new(1, 8, 1284).unwrap();
        let out = render_pagination(&p, "patient");
        assert!(out.starts_with("Showing 1 to 8 of 1,284 patients\n"));
        assert!(out.contains("[1] 2 3 4 5 … 161"));
        assert!(out.ends_with("Next ›"));
        assert!(!out.contains("Prev"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Michael", 10), "Michael");
        assert_eq!(truncate("Michael Ross", 8), "Michael…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_format_patients_row() {
        let row = PatientRow {
            chart_id: 8821,
            name: "Michael Ross".to_string(),
            email: Some("michael.ross@example.com".to_string()),
            phone: None,
            last_visit: NaiveDate::from_ymd_opt(2023, 10, 24),
            assigned_doctor: Some("Dr. Sarah Jenkins".to_string()),
            status: PatientStatus::Active,
        };
        let page = TablePage {
            rows: vec![row],
            pagination: Pagination::new(1, 8, 1).unwrap(),
            sort: SortState::default(),
            filters: FilterState::default(),
        };
        let out = format_patients(&page);
        assert!(out.contains("(MR) Michael Ross <michael.ross@example.com>"));
        assert!(out.contains("#8821"));
        assert!(out.contains("Oct 24, 2023"));
        assert!(out.contains("Showing 1 to 1 of 1 patient"));
    }
}
