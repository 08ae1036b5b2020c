use log::{debug, warn};

use crate::error::{Result, TaskError};
use crate::model::store::{ListId, TaskStore};
use crate::model::task::{Task, TaskEdit, TaskId};
use crate::model::task_list::TaskList;
use crate::offsets::partition_offsets;
use crate::service::event::{Observers, StoreEvent, SubscriptionId};

/// Input policy applied by [`TaskService`] before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceOptions {
    /// Fail batch operations that name a position outside the sequence
    /// instead of skipping it.
    pub strict_offsets: bool,
    /// Fail list names and task titles that are empty after trimming.
    pub reject_blank_names: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            strict_offsets: false,
            reject_blank_names: true,
        }
    }
}

/// Call-level API over a single [`TaskStore`].
///
/// Every successful mutation is logged and then announced to subscribers as
/// a [`StoreEvent`]. Failed calls leave the store untouched and announce
/// nothing.
pub struct TaskService {
    store: TaskStore,
    options: ServiceOptions,
    observers: Observers,
}

impl TaskService {
    pub fn new(store: TaskStore) -> Self {
        Self::with_options(store, ServiceOptions::default())
    }

    pub fn with_options(store: TaskStore, options: ServiceOptions) -> Self {
        Self {
            store,
            options,
            observers: Observers::default(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn lists(&self) -> &[TaskList] {
        self.store.lists()
    }

    pub fn list(&self, list_id: ListId) -> Result<&TaskList> {
        self.store
            .list(list_id)
            .ok_or(TaskError::ListNotFound(list_id))
    }

    fn list_mut(&mut self, list_id: ListId) -> Result<&mut TaskList> {
        self.store
            .list_mut(list_id)
            .ok_or(TaskError::ListNotFound(list_id))
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn emit(&mut self, event: StoreEvent) {
        debug!("event={:?}", event);
        self.observers.notify(&event);
    }

    fn check_name(&self, name: &str, err: TaskError) -> Result<()> {
        if self.options.reject_blank_names && name.trim().is_empty() {
            warn!("rejected blank input: {}", err);
            return Err(err);
        }
        Ok(())
    }

    /// Returns how many requested positions are in range.
    fn resolve_offsets(&self, positions: &[usize], len: usize) -> Result<usize> {
        let (valid, ignored) = partition_offsets(positions, len);
        if !ignored.is_empty() {
            if self.options.strict_offsets {
                warn!("rejected out-of-range positions {:?} (len={})", ignored, len);
                return Err(TaskError::InvalidPositions { positions: ignored, len });
            }
            warn!("ignoring out-of-range positions {:?} (len={})", ignored, len);
        }
        Ok(valid.len())
    }

    pub fn create_list(&mut self, name: &str) -> Result<ListId> {
        self.check_name(name, TaskError::BlankName)?;
        let list_id = self.store.add_list(name);
        self.emit(StoreEvent::ListCreated { list_id });
        Ok(list_id)
    }

    /// Returns the ids of the lists that were actually removed.
    pub fn delete_lists(&mut self, positions: &[usize]) -> Result<Vec<ListId>> {
        self.resolve_offsets(positions, self.store.len())?;
        let removal = self.store.remove_lists(positions);
        let list_ids: Vec<ListId> = removal.removed.iter().map(|l| l.id()).collect();
        if !list_ids.is_empty() {
            self.emit(StoreEvent::ListsDeleted { list_ids: list_ids.clone() });
        }
        Ok(list_ids)
    }

    pub fn reorder_lists(&mut self, from_positions: &[usize], to_position: usize) -> Result<()> {
        let valid = self.resolve_offsets(from_positions, self.store.len())?;
        self.store.move_lists(from_positions, to_position);
        if valid > 0 {
            self.emit(StoreEvent::ListsReordered);
        }
        Ok(())
    }

    pub fn rename_list(&mut self, list_id: ListId, name: &str) -> Result<()> {
        self.check_name(name, TaskError::BlankName)?;
        self.list_mut(list_id)?.rename(name);
        self.emit(StoreEvent::ListRenamed { list_id });
        Ok(())
    }

    pub fn create_task(&mut self, list_id: ListId, title: &str) -> Result<TaskId> {
        self.create_task_with(list_id, TaskEdit::new(title))
    }

    /// Creates a task with its due date and notes in one mutation.
    pub fn create_task_with(&mut self, list_id: ListId, edit: TaskEdit) -> Result<TaskId> {
        self.check_name(&edit.title, TaskError::BlankTitle)?;
        let task_id = self.list_mut(list_id)?.add_task_with(edit);
        self.emit(StoreEvent::TaskCreated { list_id, task_id });
        Ok(task_id)
    }

    /// Returns the ids of the tasks that were actually removed.
    pub fn delete_tasks(&mut self, list_id: ListId, positions: &[usize]) -> Result<Vec<TaskId>> {
        let len = self.list(list_id)?.len();
        self.resolve_offsets(positions, len)?;
        let removal = self.list_mut(list_id)?.remove_tasks(positions);
        let task_ids: Vec<TaskId> = removal.removed.iter().map(|t| t.id()).collect();
        if !task_ids.is_empty() {
            self.emit(StoreEvent::TasksDeleted {
                list_id,
                task_ids: task_ids.clone(),
            });
        }
        Ok(task_ids)
    }

    pub fn reorder_tasks(
        &mut self,
        list_id: ListId,
        from_positions: &[usize],
        to_position: usize,
    ) -> Result<()> {
        let len = self.list(list_id)?.len();
        let valid = self.resolve_offsets(from_positions, len)?;
        self.list_mut(list_id)?.move_tasks(from_positions, to_position);
        if valid > 0 {
            self.emit(StoreEvent::TasksReordered { list_id });
        }
        Ok(())
    }

    pub fn toggle_task(&mut self, list_id: ListId, task_id: TaskId) -> Result<bool> {
        let is_completed = self.list_mut(list_id)?.toggle_task(task_id)?;
        self.emit(StoreEvent::TaskToggled {
            list_id,
            task_id,
            is_completed,
        });
        Ok(is_completed)
    }

    /// A missing list or task is reported before a blank title.
    pub fn edit_task(&mut self, list_id: ListId, task_id: TaskId, edit: TaskEdit) -> Result<()> {
        if self.list(list_id)?.task(task_id).is_none() {
            return Err(TaskError::TaskNotFound(task_id));
        }
        self.check_name(&edit.title, TaskError::BlankTitle)?;
        self.list_mut(list_id)?.edit_task(task_id, edit)?;
        self.emit(StoreEvent::TaskEdited { list_id, task_id });
        Ok(())
    }

    pub fn toggle_all_in_list(&mut self, list_id: ListId) -> Result<bool> {
        let is_completed = self.list_mut(list_id)?.toggle_all_completion();
        self.emit(StoreEvent::AllToggled {
            list_id,
            is_completed,
        });
        Ok(is_completed)
    }

    pub fn list_tasks(&self, list_id: ListId, show_incomplete_only: bool) -> Result<Vec<Task>> {
        Ok(self
            .list(list_id)?
            .filtered_tasks(show_incomplete_only)
            .into_iter()
            .cloned()
            .collect())
    }
}
