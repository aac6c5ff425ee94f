pub mod app_state;
pub mod choice;
pub mod profile;
pub mod role;
pub mod settings;
pub mod task;
pub mod task_priority;
pub mod task_status;
pub mod user;
pub mod user_status;
