use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::task_list::TaskList;
use crate::offsets::{move_offsets, remove_at_offsets, Removal};

pub type ListId = Uuid;

/// Top-level, ordered collection of task lists.
///
/// Build one per process and hand it to whoever needs it; there is no
/// global instance.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    lists: Vec<TaskList>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn list(&self, id: ListId) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.id() == id)
    }

    pub fn list_mut(&mut self, id: ListId) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| l.id() == id)
    }

    pub fn position_of(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|l| l.id() == id)
    }

    pub fn add_list(&mut self, name: impl Into<String>) -> ListId {
        let list = TaskList::new(name);
        let id = list.id();
        self.lists.push(list);
        id
    }

    pub fn remove_lists(&mut self, offsets: &[usize]) -> Removal<TaskList> {
        remove_at_offsets(&mut self.lists, offsets)
    }

    pub fn move_lists(&mut self, offsets: &[usize], destination: usize) -> Vec<usize> {
        move_offsets(&mut self.lists, offsets, destination)
    }
}
