//! Text rendering for the appointments calendar

use super::output::truncate;
use crate::application::{CalendarBody, CalendarPage};
use crate::domain::calendar::month::DAY_NAMES;
use crate::domain::calendar::{CalendarView, MonthCell, MonthGrid, Placement, TimeGrid};

const MIN_MONTH_CELL_WIDTH: usize = 14;
const MAX_MONTH_CELL_WIDTH: usize = 24;
const WEEK_COLUMN_WIDTH: usize = 16;
const DAY_COLUMN_WIDTH: usize = 52;
const SLOT_LABEL_WIDTH: usize = 8;

fn fit(s: &str, w: usize) -> String {
    let cut = truncate(s, w);
    let fill = w.saturating_sub(cut.chars().count());
    format!("{}{}", cut, " ".repeat(fill))
}

/// Join cells with column rules, dropping blank cells at the end of the row
fn join_row(cells: &[String]) -> String {
    cells
        .join("│")
        .trim_end_matches(|c: char| c == ' ' || c == '│')
        .to_string()
}

/// Full calendar page: header, subtitle and the view body
pub fn format_calendar(page: &CalendarPage) -> String {
    let mut output = format!(
        "‹ {} ›\n{}\n{} appointment{}\n\n",
        page.cursor.header_label(),
        page.cursor.subtitle(),
        page.visible_events,
        if page.visible_events == 1 { "" } else { "s" }
    );
    match &page.body {
        CalendarBody::Month(grid) => output.push_str(&render_month(grid)),
        CalendarBody::Grid(grid) => output.push_str(&render_time_grid(grid)),
    }
    output
}

fn day_number(cell: &MonthCell) -> String {
    let day = chrono::Datelike::day(&cell.date);
    if cell.is_today {
        format!("[{}]", day)
    } else if cell.in_current_month {
        day.to_string()
    } else {
        format!("({})", day)
    }
}

/// Month grid; out-of-month days in parentheses, today in brackets
pub fn render_month(grid: &MonthGrid) -> String {
    let weeks: Vec<Vec<Vec<String>>> = grid
        .weeks
        .iter()
        .map(|week| {
            week.iter()
                .map(|cell| {
                    let mut lines = vec![day_number(cell)];
                    lines.extend(cell.chip_labels());
                    if cell.overflow > 0 {
                        lines.push(format!("+{} more", cell.overflow));
                    }
                    lines
                })
                .collect()
        })
        .collect();

    // Columns grow to fit the longest chip so first names stay whole
    let width = weeks
        .iter()
        .flatten()
        .flatten()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(MIN_MONTH_CELL_WIDTH, MAX_MONTH_CELL_WIDTH);

    let rule = vec!["─".repeat(width); 7].join("┼");
    let header: Vec<String> = DAY_NAMES.iter().map(|d| fit(d, width)).collect();
    let mut output = join_row(&header);
    output.push('\n');

    for week in &weeks {
        output.push_str(&rule);
        output.push('\n');

        let height = week.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..height {
            let line: Vec<String> = week
                .iter()
                .map(|lines| fit(lines.get(row).map(String::as_str).unwrap_or(""), width))
                .collect();
            output.push_str(&join_row(&line));
            output.push('\n');
        }
    }
    output
}

/// Second row of a full card: time range, visit type and doctor
fn card_detail(placement: &Placement) -> Option<String> {
    if placement.compact {
        return None;
    }
    let event = &placement.event;
    Some(format!(
        "{} · {} · {}",
        placement.time_text(),
        event.appointment_type.label(),
        event.doctor_name
    ))
}

/// Name line of a card; `↑`/`↓` mark a card cut off by the visible hours
fn card_title(grid: &TimeGrid, placement: &Placement) -> String {
    let name = &placement.event.patient_name;
    if !placement.clipped {
        return name.clone();
    }
    let starts_early = grid
        .slots
        .first()
        .is_some_and(|first| placement.event.start.time() < *first);
    if starts_early {
        format!("↑ {}", name)
    } else {
        format!("{} ↓", name)
    }
}

fn covers(p: &Placement, day_index: usize, slot: usize) -> bool {
    p.day_index == day_index && p.first_slot <= slot && slot < p.first_slot + p.span
}

fn grid_cell(grid: &TimeGrid, day_index: usize, slot: usize, width: usize) -> String {
    // A card starting here wins over the continuation of an earlier one
    let mut starting = grid.starting_at(day_index, slot);
    if let Some(placement) = starting.next() {
        let running = grid
            .placements
            .iter()
            .filter(|p| p.first_slot < slot && covers(p, day_index, slot))
            .count();
        let others = starting.count() + running;
        let title = card_title(grid, placement);
        let text = if others > 0 {
            let suffix = format!(" +{}", others);
            let room = width.saturating_sub(suffix.chars().count() + 2);
            format!("▌ {}{}", truncate(&title, room), suffix)
        } else {
            format!("▌ {}", title)
        };
        return fit(&text, width);
    }

    let continuing = grid
        .placements
        .iter()
        .filter(|p| covers(p, day_index, slot))
        .max_by_key(|p| p.first_slot);
    let Some(placement) = continuing else {
        return " ".repeat(width);
    };
    match card_detail(placement) {
        Some(detail) if slot == placement.first_slot + 1 => fit(&format!("┆ {}", detail), width),
        _ => fit("┆", width),
    }
}

/// Week or day time grid; one row per slot, cards drawn where they start
pub fn render_time_grid(grid: &TimeGrid) -> String {
    let width = match grid.view {
        CalendarView::Day => DAY_COLUMN_WIDTH,
        _ => WEEK_COLUMN_WIDTH,
    };

    let mut header = vec![" ".repeat(SLOT_LABEL_WIDTH)];
    header.extend(grid.days.iter().map(|d| fit(&grid.day_header(*d), width)));
    let mut output = join_row(&header);
    output.push('\n');
    output.push_str(
        &std::iter::once("─".repeat(SLOT_LABEL_WIDTH))
            .chain(grid.days.iter().map(|_| "─".repeat(width)))
            .collect::<Vec<_>>()
            .join("┼"),
    );
    output.push('\n');

    for (slot, time) in grid.slots.iter().enumerate() {
        let mut line = vec![fit(&time.format("%I:%M %p").to_string(), SLOT_LABEL_WIDTH)];
        line.extend((0..grid.days.len()).map(|day| grid_cell(grid, day, slot, width)));
        output.push_str(&join_row(&line));
        output.push('\n');
    }

    if grid.hidden > 0 {
        output.push_str(&format!(
            "\n{} appointment{} outside visible hours\n",
            grid.hidden,
            if grid.hidden == 1 { "" } else { "s" }
        ));
    }
    output
}
