//! Domain layer - Records, integrity rules and view composition

pub mod badge;
pub mod calendar;
pub mod constraints;
pub mod date_ref;
pub mod records;
pub mod table;

pub use badge::{initials, AppStatus};
pub use calendar::{CalendarCursor, CalendarView};
pub use date_ref::DateReference;
pub use records::Records;
