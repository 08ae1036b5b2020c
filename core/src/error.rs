use thiserror::Error;

use crate::model::store::ListId;
use crate::model::task::TaskId;

pub type Result<T, E = TaskError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("list not found: {0}")]
    ListNotFound(ListId),

    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("list name must not be blank")]
    BlankName,

    #[error("task title must not be blank")]
    BlankTitle,

    #[error("positions {positions:?} are out of range for {len} item(s)")]
    InvalidPositions { positions: Vec<usize>, len: usize },
}

impl TaskError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ListNotFound(_) | Self::TaskNotFound(_))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::BlankName | Self::BlankTitle | Self::InvalidPositions { .. }
        )
    }
}
