use tracker_server::models::User;

use crate::{
    api::ApiClient,
    error::{ClientError, Result},
};

/// Who is acting in this client. Lives from [`Session::login`] to
/// [`Session::logout`]; nothing is checked server-side.
#[derive(Debug, Default, Clone)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs in as `user_id`, creating the user on first use. A failed login
    /// leaves the current session untouched.
    pub async fn login(&mut self, api: &ApiClient, user_id: &str) -> Result<&User> {
        let user = api.login(user_id).await?;
        tracing::info!(user_id = %user.id, "logged in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Option<User> {
        let user = self.user.take();
        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "logged out");
        }
        user
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> Result<&User> {
        self.user.as_ref().ok_or(ClientError::NotLoggedIn)
    }
}
