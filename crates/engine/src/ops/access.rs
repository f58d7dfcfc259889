use crate::{EngineError, ResultEngine, Session, User};

use super::{Engine, normalize_required};

impl Engine {
    /// Register a user able to log in.
    ///
    /// Both `user_id` and `username` must be unused.
    pub fn add_user(
        &self,
        user_id: &str,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> ResultEngine<Session> {
        let result = self.insert_user(user_id, username, password, display_name);
        self.finish(result)
    }

    fn insert_user(
        &self,
        user_id: &str,
        username: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> ResultEngine<Session> {
        let user_id = normalize_required(user_id, "user id")?;
        let username = normalize_required(username, "username")?;
        if password.is_empty() {
            return Err(EngineError::Validation(
                "password must not be empty".to_string(),
            ));
        }

        let mut users = self.store.read_all::<User>()?;
        if let Some(existing) = users
            .iter()
            .find(|u| u.user_id == user_id || u.username == username)
        {
            let key = if existing.user_id == user_id {
                user_id
            } else {
                username
            };
            return Err(EngineError::Duplicate(key));
        }

        let user = User {
            user_id,
            username,
            password: password.to_string(),
            display_name: display_name
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(ToString::to_string),
        };
        users.push(user.clone());
        self.store.write_all(&users)?;

        tracing::info!(user_id = %user.user_id, "user added");
        Ok(Session::from(user))
    }

    /// Check credentials and open a session for the user.
    ///
    /// Unknown users and wrong passwords fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> ResultEngine<Session> {
        let username = username.trim();
        let user = self
            .store
            .read_all::<User>()?
            .into_iter()
            .find(|u| u.username == username)
            .filter(|u| u.password == password)
            .ok_or(EngineError::InvalidCredentials)?;

        tracing::debug!(user_id = %user.user_id, "user authenticated");
        Ok(Session::from(user))
    }
}
