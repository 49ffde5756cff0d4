//! This crate provides the data core of a calendar-driven to-do list.
//!
//! Tasks are short text entries attached to a calendar date. They are
//! persisted one file per month by the [`store`] module, and edited through
//! the [`controller`] module, which implements the add/complete/delete/edit
//! state machine a presentation layer drives with user intents.
//!
//! At most one month is resident in memory at a time: switching the active
//! date into another month flushes the previous month to disk before the new
//! one is loaded, and [`TaskListController::shutdown`] flushes the resident
//! month when the session ends.
//!
//! Everything is synchronous and single-threaded; the only I/O is small local
//! files.

pub mod task;
pub use task::Task;
pub mod month;
pub use month::{DayRecord, MonthFile, MonthKey};
pub mod store;
pub use store::TaskStore;
pub mod controller;
pub use controller::{EditState, TaskListController};
mod error;
pub use error::Error;
