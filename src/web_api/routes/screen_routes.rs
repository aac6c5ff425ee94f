use axum::{routing::get, Router};

use crate::{app_state::SharedState, screen::Screen, screen_controller::ScreenController};

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route(Screen::Dashboard.path(), get(ScreenController::dashboard))
        .route(Screen::Tasks.path(), get(ScreenController::tasks))
        .route(Screen::Users.path(), get(ScreenController::users))
        .route(Screen::Roles.path(), get(ScreenController::roles))
        .with_state(app_state)
}
