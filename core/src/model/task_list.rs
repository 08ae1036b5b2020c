use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TaskError};
use crate::model::store::ListId;
use crate::model::task::{Task, TaskEdit, TaskId};
use crate::offsets::{move_offsets, remove_at_offsets, Removal};

/// An ordered, named collection of tasks.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaskList {
    id: ListId,
    name: String,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    pub fn id(&self) -> ListId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_completed).count()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn position_of(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id() == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(TaskError::TaskNotFound(id))
    }

    /// Appends a new incomplete task and returns its id.
    pub fn add_task(&mut self, title: impl Into<String>) -> TaskId {
        self.add_task_with(TaskEdit::new(title))
    }

    /// Appends a new incomplete task with its due date and notes already set.
    pub fn add_task_with(&mut self, edit: TaskEdit) -> TaskId {
        let task = Task::from_edit(edit);
        let id = task.id();
        self.tasks.push(task);
        id
    }

    pub fn remove_tasks(&mut self, offsets: &[usize]) -> Removal<Task> {
        remove_at_offsets(&mut self.tasks, offsets)
    }

    /// Returns the ignored out-of-range offsets.
    pub fn move_tasks(&mut self, offsets: &[usize], destination: usize) -> Vec<usize> {
        move_offsets(&mut self.tasks, offsets, destination)
    }

    /// Flips one task's completion flag and returns the new value.
    pub fn toggle_task(&mut self, id: TaskId) -> Result<bool> {
        Ok(self.task_mut(id)?.toggle())
    }

    pub fn edit_task(&mut self, id: TaskId, edit: TaskEdit) -> Result<()> {
        self.task_mut(id)?.apply(edit);
        Ok(())
    }

    /// Marks every task incomplete when all of them are completed, otherwise
    /// marks every task completed. Returns the state every task now has.
    pub fn toggle_all_completion(&mut self) -> bool {
        let all_completed = self.tasks.iter().all(|t| t.is_completed);
        let target = !all_completed;
        for task in &mut self.tasks {
            task.is_completed = target;
        }
        target
    }

    pub fn filtered_tasks(&self, show_incomplete_only: bool) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| !show_incomplete_only || !t.is_completed)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn titles(list: &TaskList) -> Vec<&str> {
        list.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    fn list_with(titles: &[&str]) -> TaskList {
        let mut list = TaskList::new("Groceries");
        for title in titles {
            list.add_task(*title);
        }
        list
    }

    #[test]
    fn test_add_then_remove_restores_sequence() {
        let mut list = list_with(&["A", "B"]);
        let before = list.clone();

        let id = list.add_task("C");
        let position = list.position_of(id).unwrap();
        assert_eq!(position, 2);

        let removal = list.remove_tasks(&[position]);
        assert_eq!(removal.removed[0].id(), id);
        assert_eq!(list, before);
    }

    #[test]
    fn test_duplicate_titles_allowed() {
        let list = list_with(&["Milk", "Milk"]);
        assert_eq!(list.len(), 2);
        assert_ne!(list.tasks()[0].id(), list.tasks()[1].id());
    }

    #[test]
    fn test_batch_remove() {
        let mut list = list_with(&["A", "B", "C"]);
        list.remove_tasks(&[0, 2]);
        assert_eq!(titles(&list), vec!["B"]);
    }

    #[test]
    fn test_move_tasks() {
        let mut list = list_with(&["A", "B", "C", "D"]);
        let ignored = list.move_tasks(&[0, 1], 3);
        assert!(ignored.is_empty());
        assert_eq!(titles(&list), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn test_toggle_task() {
        let mut list = list_with(&["A"]);
        let id = list.tasks()[0].id();
        assert_eq!(list.toggle_task(id).unwrap(), true);
        assert!(list.tasks()[0].is_completed);
        assert_eq!(list.toggle_task(id).unwrap(), false);

        let missing = Uuid::new_v4();
        assert_eq!(list.toggle_task(missing), Err(TaskError::TaskNotFound(missing)));
    }

    #[test]
    fn test_edit_task_replaces_fields_wholesale() {
        let mut list = list_with(&["A"]);
        let id = list.tasks()[0].id();
        let due = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        list.edit_task(id, TaskEdit::new("A!").due_date(Some(due)).notes(Some("n".into())))
            .unwrap();
        list.toggle_task(id).unwrap();

        list.edit_task(id, TaskEdit::new("A?")).unwrap();
        let task = list.task(id).unwrap();
        assert_eq!(task.title, "A?");
        assert_eq!(task.due_date, None);
        assert_eq!(task.notes, None);
        assert!(task.is_completed);
    }

    #[test]
    fn test_add_task_with_fields() {
        let mut list = list_with(&["A"]);
        let due = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
        let id = list.add_task_with(TaskEdit::new("B").due_date(Some(due)).notes(Some("n".into())));
        assert_eq!(list.position_of(id), Some(1));
        let task = list.task(id).unwrap();
        assert_eq!(task.due_date, Some(due));
        assert_eq!(task.notes.as_deref(), Some("n"));
        assert!(!task.is_completed);
    }

    #[test]
    fn test_edit_missing_task_leaves_list_untouched() {
        let mut list = list_with(&["A", "B"]);
        let before = list.clone();
        let missing = Uuid::new_v4();
        let err = list.edit_task(missing, TaskEdit::new("X")).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(list, before);
    }

    #[test]
    fn test_toggle_all_completion() {
        let mut list = list_with(&["A", "B"]);
        assert!(list.toggle_all_completion());
        assert!(list.tasks().iter().all(|t| t.is_completed));
        assert!(!list.toggle_all_completion());
        assert!(list.tasks().iter().all(|t| !t.is_completed));

        // Mixed always ends up all completed.
        let id = list.tasks()[0].id();
        list.toggle_task(id).unwrap();
        assert!(list.toggle_all_completion());
        assert_eq!(list.completed_count(), 2);
    }

    #[test]
    fn test_toggle_all_on_empty_list() {
        let mut list = TaskList::new("Empty");
        assert!(!list.toggle_all_completion());
        assert!(list.is_empty());
    }

    #[test]
    fn test_filtered_tasks() {
        let mut list = list_with(&["t1", "t2", "t3"]);
        let t2 = list.tasks()[1].id();
        list.toggle_task(t2).unwrap();

        let incomplete: Vec<&str> = list
            .filtered_tasks(true)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(incomplete, vec!["t1", "t3"]);

        let all: Vec<&str> = list
            .filtered_tasks(false)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(all, vec!["t1", "t2", "t3"]);
    }

    #[test]
    fn test_rename() {
        let mut list = TaskList::new("Work");
        let id = list.id();
        list.rename("Office");
        assert_eq!(list.name(), "Office");
        assert_eq!(list.id(), id);
    }
}
