pub mod event;
pub mod task_service;
