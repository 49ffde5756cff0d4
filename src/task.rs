//! To-do tasks and their display text

use serde::{Deserialize, Serialize};

/// The glyph prepended to a completed task's display text.
pub const DONE_MARKER: char = '\u{2713}';

/// A single to-do entry: a short text and a completion flag.
///
/// A task has no identifier of its own; within a day it is identified by its
/// position in the day's list. The stored text never carries the completion
/// marker, that glyph only exists in [`display_text`](Task::display_text)
/// output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    text: String,
    done: bool,
}

impl Task {
    /// Create a task. The text is stored trimmed; callers are expected to
    /// have rejected blank text already.
    pub fn new(text: String, done: bool) -> Self {
        Self {
            text: text.trim().to_string(),
            done,
        }
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn done(&self) -> bool { self.done }

    /// Replace the task's text, keeping its completion flag.
    pub fn set_text(&mut self, new_text: String) {
        self.text = new_text.trim().to_string();
    }

    /// Flip the completion flag.
    pub fn toggle_done(&mut self) {
        self.done = !self.done;
    }

    /// The string a task list should render for this task.
    pub fn display_text(&self) -> String {
        compose_marker(&self.text, self.done)
    }
}

/// Prefix `text` with the completion marker when `done`.
///
/// This is the only place the marker is attached; [`strip_marker`] is its
/// inverse.
pub fn compose_marker(text: &str, done: bool) -> String {
    if done {
        format!("{} {}", DONE_MARKER, text)
    } else {
        text.to_string()
    }
}

/// Strip a leading completion marker, if present.
pub fn strip_marker(text: &str) -> &str {
    match text.strip_prefix(DONE_MARKER) {
        Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
        None => text,
    }
}
