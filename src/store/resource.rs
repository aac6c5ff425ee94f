use serde::{de::DeserializeOwned, Serialize};

use crate::{
    role::Role, role_create_request::RoleCreateRequest, role_update_request::RoleUpdateRequest, task::Task,
    task_create_request::TaskCreateRequest, task_update_request::TaskUpdateRequest, user::User,
    user_create_request::UserCreateRequest, user_update_request::UserUpdateRequest,
};

/// A cached, server-assigned record.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> i64;
}

impl Record for Role {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// A remote collection: where it lives and what goes over the wire.
pub trait Resource: Send + Sync + 'static {
    type Record: Record;
    type Create: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;

    /// Collection path, e.g. `/roles`.
    const PATH: &'static str;
    /// Singular name for logs and messages.
    const NAME: &'static str;
}

pub struct Roles;

impl Resource for Roles {
    type Record = Role;
    type Create = RoleCreateRequest;
    type Update = RoleUpdateRequest;
    const PATH: &'static str = "/roles";
    const NAME: &'static str = "role";
}

pub struct Users;

impl Resource for Users {
    type Record = User;
    type Create = UserCreateRequest;
    type Update = UserUpdateRequest;
    const PATH: &'static str = "/users";
    const NAME: &'static str = "user";
}

pub struct Tasks;

impl Resource for Tasks {
    type Record = Task;
    type Create = TaskCreateRequest;
    type Update = TaskUpdateRequest;
    const PATH: &'static str = "/tasks";
    const NAME: &'static str = "task";
}
