use serde::Serialize;

use crate::profile::Profile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Home,
    Tables,
    Cards,
    Charts,
}

/// The dashboard's screens, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Dashboard,
    Tasks,
    Users,
    Roles,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Dashboard, Screen::Tasks, Screen::Users, Screen::Roles];

    pub const fn path(self) -> &'static str {
        match self {
            Screen::Dashboard => "/example",
            Screen::Tasks => "/example/task",
            Screen::Users => "/example/user",
            Screen::Roles => "/example/role",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Screen::Dashboard => "Dashboard",
            Screen::Tasks => "Task",
            Screen::Users => "User",
            Screen::Roles => "Role",
        }
    }

    pub const fn icon(self) -> Icon {
        match self {
            Screen::Dashboard => Icon::Home,
            Screen::Tasks => Icon::Tables,
            Screen::Users => Icon::Cards,
            Screen::Roles => Icon::Charts,
        }
    }

    /// The dashboard entry is only active on its own path; the others
    /// also cover anything below them.
    pub const fn exact(self) -> bool {
        matches!(self, Screen::Dashboard)
    }

    pub fn is_active(self, pathname: &str) -> bool {
        if self.exact() {
            pathname == self.path()
        } else {
            pathname.starts_with(self.path())
        }
    }

    /// Where a freshly signed-in user goes.
    pub fn landing_for(profile: &Profile) -> Screen {
        if profile.is_admin() {
            Screen::Dashboard
        } else {
            Screen::Tasks
        }
    }
}

/// Sidebar entries for `profile`: administrators see every screen,
/// everyone else only their tasks.
pub fn sidebar(profile: &Profile) -> &'static [Screen] {
    if profile.is_admin() {
        &Screen::ALL
    } else {
        &[Screen::Tasks]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(roles: &[&str]) -> Profile {
        Profile { id: 1, username: "ada".into(), roles: roles.iter().map(|r| r.to_string()).collect() }
    }

    #[test]
    fn active_matching() {
        assert!(Screen::Dashboard.is_active("/example"));
        assert!(!Screen::Dashboard.is_active("/example/task"));
        assert!(Screen::Tasks.is_active("/example/task"));
        assert!(Screen::Tasks.is_active("/example/task/12"));
        assert!(!Screen::Users.is_active("/example/role"));
    }

    #[test]
    fn sidebar_and_landing_follow_admin_role() {
        let admin = profile(&["ROLE_ADMIN"]);
        assert_eq!(sidebar(&admin).len(), 4);
        assert_eq!(Screen::landing_for(&admin), Screen::Dashboard);

        let user = profile(&["ROLE_USER"]);
        assert_eq!(sidebar(&user), &[Screen::Tasks]);
        assert_eq!(Screen::landing_for(&user), Screen::Tasks);
    }
}
