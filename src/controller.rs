//! The task-list editing state machine
//!
//! Translates the intents of a presentation layer (add, select, toggle,
//! delete, edit, switch date) into mutations of the active day's task list,
//! and drives the store's flush/load cycle when the active date crosses a
//! month boundary. At most one month is resident in memory at a time.

use chrono::NaiveDate;

use crate::error::Error;
use crate::month::{DayRecord, MonthFile, MonthKey};
use crate::store::TaskStore;
use crate::task::Task;

/// What the controller is currently doing.
///
/// While a task is being edited every other intent is locked out; the only
/// ways back to [`Idle`](EditState::Idle) are
/// [`commit_edit`](TaskListController::commit_edit) and
/// [`cancel_edit`](TaskListController::cancel_edit).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditState {
    Idle,
    /// An in-progress edit of the task at this index.
    Editing(usize),
}

/// The in-memory side of one application session: the active date, its
/// working task list, and the resident month both belong to exactly one
/// controller.
///
/// In-memory intents are no-op guarded: they return whether anything changed,
/// so a blank add or an out-of-range index is simply ignored. Intents that
/// touch storage ([`switch_date`](Self::switch_date),
/// [`shutdown`](Self::shutdown)) return a [`Result`] instead, and their
/// failures must reach the user (see [`Error`]).
pub struct TaskListController {
    store: TaskStore,
    active_date: NaiveDate,
    resident: MonthKey,
    month: MonthFile,
    day: DayRecord,
    selection: Option<usize>,
    state: EditState,
}

impl TaskListController {
    /// Open a session on `date`, loading its month from `store`.
    pub fn open(store: TaskStore, date: NaiveDate) -> Result<Self, Error> {
        let resident = MonthKey::of(date);
        let month = store.load_month(resident)?;
        let day = month.day(date).to_vec();
        Ok(Self {
            store,
            active_date: date,
            resident,
            month,
            day,
            selection: None,
            state: EditState::Idle,
        })
    }

    pub fn active_date(&self) -> NaiveDate {
        self.active_date
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing(_))
    }

    /// The currently selected task, if any. The presentation layer enables
    /// its completion/edit/delete controls from this.
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// The active day's tasks, in display order.
    pub fn tasks(&self) -> &[Task] {
        &self.day
    }

    /// `(display text, done)` pairs for the presentation layer to render.
    pub fn rows(&self) -> Vec<(String, bool)> {
        self.day
            .iter()
            .map(|task| (task.display_text(), task.done()))
            .collect()
    }

    /// Append a task to the active day. Blank text is ignored.
    pub fn add_task(&mut self, text: &str) -> bool {
        if self.is_editing() {
            return false;
        }
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.day.push(Task::new(text.to_string(), false));
        self.selection = None;
        true
    }

    /// Select the task that completion/edit/delete intents apply to.
    pub fn select_task(&mut self, index: usize) -> bool {
        if self.is_editing() || index >= self.day.len() {
            return false;
        }
        self.selection = Some(index);
        true
    }

    /// Flip the completion flag of the task at `index`.
    pub fn toggle_complete(&mut self, index: usize) -> bool {
        if self.is_editing() {
            return false;
        }
        match self.day.get_mut(index) {
            Some(task) => {
                task.toggle_done();
                self.selection = None;
                true
            }
            None => false,
        }
    }

    /// Remove the task at `index`. Later tasks shift down one position.
    pub fn delete_task(&mut self, index: usize) -> bool {
        if self.is_editing() || index >= self.day.len() {
            return false;
        }
        self.day.remove(index);
        self.selection = None;
        true
    }

    /// Start editing the task at `index`. Returns the text to pre-fill the
    /// edit field with.
    pub fn begin_edit(&mut self, index: usize) -> Option<String> {
        if self.is_editing() {
            return None;
        }
        let task = self.day.get(index)?;
        self.state = EditState::Editing(index);
        Some(task.text().to_string())
    }

    /// Finish the in-progress edit. Non-blank text replaces the task's text,
    /// keeping its completion flag; blank text leaves the task unchanged,
    /// like a cancel. The controller returns to idle either way.
    pub fn commit_edit(&mut self, text: &str) -> bool {
        let index = match self.state {
            EditState::Editing(index) => index,
            EditState::Idle => return false,
        };
        self.state = EditState::Idle;
        self.selection = None;

        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.day[index].set_text(text.to_string());
        true
    }

    /// Abandon the in-progress edit without touching the task.
    pub fn cancel_edit(&mut self) -> bool {
        match self.state {
            EditState::Editing(_) => {
                self.state = EditState::Idle;
                self.selection = None;
                true
            }
            EditState::Idle => false,
        }
    }

    /// Make `date` the active date.
    ///
    /// Within the resident month this is a pure in-memory move. Crossing a
    /// month boundary flushes the resident month to disk, then loads the new
    /// one; the previous in-memory copy is dropped. Refused while a task is
    /// being edited.
    ///
    /// On a storage failure the controller stays on the old date with its
    /// state intact, so the caller can surface the error and retry.
    pub fn switch_date(&mut self, date: NaiveDate) -> Result<(), Error> {
        if self.is_editing() {
            return Err(Error::EditInProgress);
        }
        self.write_back();

        let key = MonthKey::of(date);
        if key != self.resident {
            self.store.save_month(self.resident, &self.month)?;
            self.month = self.store.load_month(key)?;
            log::debug!("Switched resident month from {} to {}", self.resident, key);
            self.resident = key;
        }

        self.active_date = date;
        self.day = self.month.day(date).to_vec();
        self.selection = None;
        Ok(())
    }

    /// Flush the resident month and end the session.
    ///
    /// The presentation layer calls this on normal termination; edits made
    /// since the last month switch are only durable afterwards. Consuming the
    /// controller makes "flush once, then no further edits" hold by
    /// construction.
    pub fn shutdown(mut self) -> Result<(), Error> {
        self.write_back();
        self.store.save_month(self.resident, &self.month)
    }

    /// Mirror the working day list into the resident month.
    fn write_back(&mut self) {
        self.month.set_day(self.active_date, self.day.clone());
    }
}
