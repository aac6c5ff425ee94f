// Requests
pub mod login_request;
pub mod role_create_request;
pub mod role_update_request;
pub mod task_create_request;
pub mod task_update_request;
pub mod user_create_request;
pub mod user_update_request;

// Responses
pub mod login_response;
pub mod screen_page;
