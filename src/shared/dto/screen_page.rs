use serde::Serialize;

use crate::{
    dashboard::DashboardSummary,
    list_view::{ListView, Searchable},
    profile::Profile,
    screen::{sidebar, Icon, Screen},
    store::resource::Resource,
};

#[derive(Debug, Clone, Serialize)]
pub struct SidebarEntry {
    pub path: &'static str,
    pub title: &'static str,
    pub icon: Icon,
    pub active: bool,
}

/// One rendered page of a list screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenPage<T> {
    pub screen: Screen,
    pub title: &'static str,
    pub sidebar: Vec<SidebarEntry>,
    pub query: String,
    pub page: usize,
    pub page_count: usize,
    pub matched: usize,
    pub items: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DashboardSummary>,
}

impl<T: Clone> ScreenPage<T> {
    pub fn new<R>(screen: Screen, profile: &Profile, list: &ListView<R>) -> Self
    where
        R: Resource<Record = T>,
        T: Searchable,
    {
        let sidebar = sidebar(profile)
            .iter()
            .map(|entry| SidebarEntry {
                path: entry.path(),
                title: entry.title(),
                icon: entry.icon(),
                active: entry.is_active(screen.path()),
            })
            .collect();
        ScreenPage {
            screen,
            title: screen.title(),
            sidebar,
            query: list.query().to_string(),
            page: list.page(),
            page_count: list.page_count(),
            matched: list.matched(),
            items: list.visible().to_vec(),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: DashboardSummary) -> Self {
        self.summary = Some(summary);
        self
    }
}
