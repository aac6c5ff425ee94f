pub mod authentication_routes;
pub mod screen_routes;

use axum::{middleware, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{app_state::SharedState, gate::session_gate};

pub fn map_routes(app_state: SharedState) -> Router {
    Router::new()
        .merge(authentication_routes::get_router(app_state.clone()))
        .merge(screen_routes::get_router(app_state.clone()))
        .layer(middleware::from_fn_with_state(app_state, session_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}
