//---------------------------------------
pub mod web_api {
    pub mod routes;
    pub mod controllers;
}

pub use web_api::routes::map_routes;
pub use web_api::controllers::*;
//---------------------------------------

//---------------------------------------
pub mod shared {
    pub mod models;
    pub mod dto;
}

pub use shared::models::*;
pub use shared::dto::*;
//---------------------------------------

//---------------------------------------
pub mod authentication {
    pub mod gate;
}

pub use authentication::*;
//---------------------------------------

//---------------------------------------
pub mod session {
    pub mod context;
    pub mod credential;
    pub mod slot;
    pub mod vault;
}

pub use session::*;
//---------------------------------------

//---------------------------------------
pub mod validation {
    pub mod checks;
    pub mod draft;
    pub mod field_errors;
    pub mod role_schema;
    pub mod task_schema;
    pub mod user_schema;
}

pub use validation::*;
//---------------------------------------

//---------------------------------------
pub mod api {
    pub mod client;
    pub mod error;
}

pub mod store {
    pub mod entity_store;
    pub mod error;
    pub mod event;
    pub mod merge;
    pub mod resource;
    pub mod task_filter;
}
//---------------------------------------

//---------------------------------------
pub mod view_model {
    pub mod dashboard;
    pub mod form_flow;
    pub mod list_view;
    pub mod login_form;
    pub mod modal;
    pub mod role_screen;
    pub mod signup_form;
    pub mod submit;
    pub mod task_screen;
    pub mod user_screen;
}

pub use view_model::*;
//---------------------------------------

pub mod screen;
