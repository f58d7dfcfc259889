//! Users and the explicit session handed to pledge entry points.

use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A user able to log in and pledge.
///
/// Passwords are kept as plain text, matching existing data directories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub password: String,
    pub display_name: Option<String>,
}

impl Record for User {
    const FILE: &'static str = "users.csv";
    const FIELDS: &'static [&'static str] = &["user_id", "username", "password", "display_name"];
}

/// The authenticated actor of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        let display_name = user
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.username.clone());
        Self {
            user_id: user.user_id,
            username: user.username,
            display_name,
        }
    }
}
