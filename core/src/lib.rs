pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod model;
pub mod offsets;
pub mod service;
pub mod time;

pub use config::Config;
pub use display::DueDateAdapter;
pub use error::{Result, TaskError};
pub use input::{expand_key, parse_args, split_command_line, ParsedInput};
pub use model::store::{ListId, TaskStore};
pub use model::task::{Task, TaskEdit, TaskId};
pub use model::task_list::TaskList;
pub use service::event::{StoreEvent, SubscriptionId};
pub use service::task_service::{ServiceOptions, TaskService};
pub use time::{parse_human_date, parse_human_date_from};
