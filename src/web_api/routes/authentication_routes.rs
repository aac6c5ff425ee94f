use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::SharedState, authentication_controller::AuthenticationController};

pub fn get_router(app_state: SharedState) -> Router {
    Router::new()
        .route("/", get(AuthenticationController::landing))
        .route("/login", post(AuthenticationController::login))
        .route("/logout", post(AuthenticationController::logout))
        .route("/signup", post(AuthenticationController::signup))
        .with_state(app_state)
}
