use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type TaskId = Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    pub title: String,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            is_completed: false,
            due_date: None,
            notes: None,
        }
    }

    /// Builds an incomplete task carrying every field of `edit`.
    pub fn from_edit(edit: TaskEdit) -> Self {
        Self {
            due_date: edit.due_date,
            notes: edit.notes,
            ..Self::new(edit.title)
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.is_completed = !self.is_completed;
        self.is_completed
    }

    pub(crate) fn apply(&mut self, edit: TaskEdit) {
        self.title = edit.title;
        self.due_date = edit.due_date;
        self.notes = edit.notes;
    }
}

/// Replacement values for the editable fields of a task.
///
/// An edit always overwrites all three fields; start from
/// [`TaskEdit::from_task`] to change only some of them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskEdit {
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl TaskEdit {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            due_date: task.due_date,
            notes: task.notes.clone(),
        }
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}
