//! Pagination footer: row window, summary line and page chips

use crate::error::{ClinicError, Result};
use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const DEFAULT_MAX_PAGE_CHIPS: usize = 5;

/// One element of the chip strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChip {
    Page { number: usize, current: bool },
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based
    pub page: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub max_page_chips: usize,
}

impl Pagination {
    pub fn new(page: usize, page_size: usize, total_rows: usize) -> Result<Self> {
        if page == 0 {
            return Err(ClinicError::InvalidArgument(
                "page must be at least 1".to_string(),
            ));
        }
        if page_size == 0 {
            return Err(ClinicError::InvalidArgument(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Pagination {
            page,
            page_size,
            total_rows,
            max_page_chips: DEFAULT_MAX_PAGE_CHIPS,
        })
    }

    pub fn with_max_chips(mut self, max_page_chips: usize) -> Self {
        self.max_page_chips = max_page_chips.max(1);
        self
    }

    pub fn total_pages(&self) -> usize {
        self.total_rows.div_ceil(self.page_size).max(1)
    }

    /// Zero-based index range of the rows on this page
    pub fn row_range(&self) -> Range<usize> {
        let start = (self.page - 1)
            .saturating_mul(self.page_size)
            .min(self.total_rows);
        let end = self.page.saturating_mul(self.page_size).min(self.total_rows);
        start..end
    }

    /// Slice out the current page
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let range = self.row_range();
        let end = range.end.min(rows.len());
        let start = range.start.min(end);
        &rows[start..end]
    }

    /// 1-based first row shown, for the summary line
    pub fn first_row_number(&self) -> usize {
        ((self.page - 1).saturating_mul(self.page_size) + 1).min(self.total_rows)
    }

    pub fn last_row_number(&self) -> usize {
        self.row_range().end
    }

    /// "Showing 1 to 8 of 1,284 patients"
    pub fn summary(&self, entity_label: &str) -> String {
        let plural = if self.total_rows == 1 { "" } else { "s" };
        format!(
            "Showing {} to {} of {} {}{}",
            group_thousands(self.first_row_number()),
            group_thousands(self.last_row_number()),
            group_thousands(self.total_rows),
            entity_label,
            plural
        )
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Page numbers in the window centred on the current page
    pub fn window(&self) -> Range<usize> {
        let total = self.total_pages();
        let chips = self.max_page_chips.max(1);
        let half = chips / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + chips - 1).min(total);
        // Shift left when the window hits the last page
        let start = end.saturating_sub(chips - 1).max(1);
        start..end + 1
    }

    /// Full chip strip: first page, ellipsis, window, ellipsis, last page
    pub fn chips(&self) -> Vec<PageChip> {
        let total = self.total_pages();
        let window = self.window();
        let chip = |number: usize| PageChip::Page {
            number,
            current: number == self.page,
        };

        let mut chips = Vec::new();
        if window.start > 1 {
            chips.push(chip(1));
            if window.start > 2 {
                chips.push(PageChip::Ellipsis);
            }
        }
        chips.extend(window.clone().map(chip));
        if window.end - 1 < total {
            if window.end < total {
                chips.push(PageChip::Ellipsis);
            }
            chips.push(chip(total));
        }
        chips
    }
}

/// 1284 → "1,284"
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(chips: &[PageChip]) -> Vec<usize> {
        chips
            .iter()
            .filter_map(|c| match c {
                PageChip::Page { number, .. } => Some(*number),
                PageChip::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn test_row_range_property() {
        for total in [0usize, 1, 7, 8, 9, 20, 1284] {
            for size in [1usize, 3, 8, 25] {
                for page in 1..=10usize {
                    let p = Pagination::new(page, size, total).unwrap();
                    let start = ((page - 1) * size).min(total);
                    let end = (page * size).min(total);
                    assert_eq!(p.row_range(), start..end, "p={} s={} n={}", page, size, total);
                }
            }
        }
    }

    #[test]
    fn test_chips_never_exceed_total_pages() {
        for total in [0usize, 5, 8, 9, 40, 1284] {
            for page in 1..=12usize {
                for max in [1usize, 3, 5, 7] {
                    let p = Pagination::new(page, 8, total).unwrap().with_max_chips(max);
                    let numbers = pages(&p.chips());
                    assert!(numbers.iter().all(|n| *n >= 1 && *n <= p.total_pages()));
                    let mut sorted = numbers.clone();
                    sorted.dedup();
                    assert_eq!(sorted, numbers, "no duplicate chips");
                }
            }
        }
    }

    #[test]
    fn test_slice() {
        let rows: Vec<u32> = (1..=20).collect();
        let p = Pagination::new(3, 8, rows.len()).unwrap();
        assert_eq!(p.slice(&rows), &[17, 18, 19, 20]);
        let beyond = Pagination::new(9, 8, rows.len()).unwrap();
        assert!(beyond.slice(&rows).is_empty());
    }

    #[test]
    fn test_zero_page_or_size_rejected() {
        assert!(Pagination::new(0, 8, 10).is_err());
        assert!(Pagination::new(1, 0, 10).is_err());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(Pagination::new(1, 8, 0).unwrap().total_pages(), 1);
        assert_eq!(Pagination::new(1, 8, 8).unwrap().total_pages(), 1);
        assert_eq!(Pagination::new(1, 8, 9).unwrap().total_pages(), 2);
        assert_eq!(Pagination::new(1, 8, 1284).unwrap().total_pages(), 161);
    }

    #[test]
    fn test_summary() {
        let p = Pagination::new(1, 8, 1284).unwrap();
        assert_eq!(p.summary("patient"), "Showing 1 to 8 of 1,284 patients");
        let one = Pagination::new(1, 8, 1).unwrap();
        assert_eq!(one.summary("patient"), "Showing 1 to 1 of 1 patient");
        let none = Pagination::new(1, 8, 0).unwrap();
        assert_eq!(none.summary("record"), "Showing 0 to 0 of 0 records");
    }

    #[test]
    fn test_chip_strip_in_the_middle() {
        let p = Pagination::new(50, 8, 1284).unwrap();
        let chips = p.chips();
        assert_eq!(chips.first(), Some(&PageChip::Page { number: 1, current: false }));
        assert_eq!(chips[1], PageChip::Ellipsis);
        assert_eq!(pages(&chips), vec![1, 48, 49, 50, 51, 52, 161]);
        assert!(chips.contains(&PageChip::Page { number: 50, current: true }));
        assert_eq!(chips[chips.len() - 2], PageChip::Ellipsis);
    }

    #[test]
    fn test_chip_window_shifts_at_edges() {
        let first = Pagination::new(1, 8, 1284).unwrap();
        assert_eq!(pages(&first.chips()), vec![1, 2, 3, 4, 5, 161]);

        let last = Pagination::new(161, 8, 1284).unwrap();
        assert_eq!(pages(&last.chips()), vec![1, 157, 158, 159, 160, 161]);

        let small = Pagination::new(2, 8, 20).unwrap();
        assert_eq!(small.chips().len(), 3);
        assert!(!small.chips().contains(&PageChip::Ellipsis));
    }

    #[test]
    fn test_prev_next() {
        let p = Pagination::new(1, 8, 20).unwrap();
        assert!(!p.has_previous());
        assert!(p.has_next());
        let p = Pagination::new(3, 8, 20).unwrap();
        assert!(p.has_previous());
        assert!(!p.has_next());
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1284), "1,284");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
