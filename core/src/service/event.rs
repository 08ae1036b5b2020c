use serde::Serialize;

use crate::model::store::ListId;
use crate::model::task::TaskId;

/// Change notification issued after a mutation has been applied.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StoreEvent {
    ListCreated { list_id: ListId },
    ListsDeleted { list_ids: Vec<ListId> },
    ListsReordered,
    ListRenamed { list_id: ListId },
    TaskCreated { list_id: ListId, task_id: TaskId },
    TasksDeleted { list_id: ListId, task_ids: Vec<TaskId> },
    TasksReordered { list_id: ListId },
    TaskToggled { list_id: ListId, task_id: TaskId, is_completed: bool },
    TaskEdited { list_id: ListId, task_id: TaskId },
    AllToggled { list_id: ListId, is_completed: bool },
}

pub type Observer = Box<dyn FnMut(&StoreEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, event: &StoreEvent) {
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }
}
