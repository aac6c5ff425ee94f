use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    app_state::{AppState, SharedState},
    context::Session,
    credential::Credential,
    dashboard::DashboardScreen,
    list_view::{ListView, Searchable},
    profile::Profile,
    role::Role,
    role_screen::RoleScreen,
    screen::Screen,
    screen_page::ScreenPage,
    store::{
        entity_store::{RoleStore, TaskStore, UserStore},
        error::StoreError,
        resource::Resource,
    },
    task::Task,
    task_screen::TaskScreen,
    user::User,
    user_screen::UserScreen,
};

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub q: Option<String>,
}

type PageResult<T> = Result<Json<ScreenPage<T>>, (StatusCode, String)>;

/// Read-only JSON views of the dashboard screens, one fresh session and
/// set of stores per request.
pub struct ScreenController {}

impl ScreenController {
    pub async fn dashboard(
        State(state): State<SharedState>,
        credential: Option<Extension<Credential>>,
        Query(query): Query<PageQuery>,
    ) -> PageResult<Task> {
        let (profile, session) = open_session(&state, credential).await?;
        let users = Arc::new(UserStore::new(state.api.clone(), session.clone()));
        let tasks = Arc::new(TaskStore::new(state.api.clone(), session));

        let mut screen = DashboardScreen::new(users, tasks);
        screen.load().await.map_err(store_failure)?;
        apply(screen.tasks_mut(), &query);
        let page = ScreenPage::new(Screen::Dashboard, &profile, screen.tasks()).with_summary(screen.summary());
        Ok(Json(page))
    }

    pub async fn tasks(
        State(state): State<SharedState>,
        credential: Option<Extension<Credential>>,
        Query(query): Query<PageQuery>,
    ) -> PageResult<Task> {
        let (profile, session) = open_session(&state, credential).await?;
        let users = Arc::new(UserStore::new(state.api.clone(), session.clone()));
        let tasks = Arc::new(TaskStore::new(state.api.clone(), session));

        let mut screen = TaskScreen::new(tasks, users, profile.clone());
        screen.load().await.map_err(store_failure)?;
        apply(screen.list_mut(), &query);
        Ok(Json(ScreenPage::new(Screen::Tasks, &profile, screen.list())))
    }

    pub async fn users(
        State(state): State<SharedState>,
        credential: Option<Extension<Credential>>,
        Query(query): Query<PageQuery>,
    ) -> PageResult<User> {
        let (profile, session) = open_session(&state, credential).await?;
        let users = Arc::new(UserStore::new(state.api.clone(), session.clone()));
        let roles = Arc::new(RoleStore::new(state.api.clone(), session));

        let mut screen = UserScreen::new(users, roles, profile.clone());
        screen.load().await.map_err(store_failure)?;
        apply(screen.list_mut(), &query);
        Ok(Json(ScreenPage::new(Screen::Users, &profile, screen.list())))
    }

    pub async fn roles(
        State(state): State<SharedState>,
        credential: Option<Extension<Credential>>,
        Query(query): Query<PageQuery>,
    ) -> PageResult<Role> {
        let (profile, session) = open_session(&state, credential).await?;
        let roles = Arc::new(RoleStore::new(state.api.clone(), session));

        let mut screen = RoleScreen::new(roles, profile.clone());
        screen.load().await.map_err(store_failure)?;
        apply(screen.list_mut(), &query);
        Ok(Json(ScreenPage::new(Screen::Roles, &profile, screen.list())))
    }
}

async fn open_session(
    state: &AppState,
    credential: Option<Extension<Credential>>,
) -> Result<(Profile, Session), (StatusCode, String)> {
    let unauthorized = || (StatusCode::UNAUTHORIZED, "Invalid credentials".to_string());

    let Some(Extension(credential)) = credential else {
        return Err(unauthorized());
    };
    let profile = state
        .profile_for(&credential)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "cannot resolve profile for credential");
            unauthorized()
        })?
        .ok_or_else(unauthorized)?;
    Ok((profile, Session::with_credential(credential)))
}

fn apply<R: Resource>(list: &mut ListView<R>, query: &PageQuery)
where
    R::Record: Searchable,
{
    if let Some(q) = &query.q {
        list.set_query(q.clone());
    }
    if let Some(page) = query.page {
        list.set_page(page);
    }
}

fn store_failure(e: StoreError) -> (StatusCode, String) {
    match e {
        StoreError::Unauthenticated => (StatusCode::UNAUTHORIZED, e.to_string()),
        _ => (StatusCode::BAD_GATEWAY, e.to_string()),
    }
}
