use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;

use tracker_server::{
    models::{IssueWithAssignee, ProjectDetail, ProjectWithCreator, User},
    services::issues::{IssueUpdate, NewIssue},
};

use crate::error::{ClientError, Result};

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct LoginBody {
    user: User,
}

/// Typed access to the tracker's `/api` routes.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "request rejected");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn login(&self, user_id: &str) -> Result<User> {
        let response = self
            .http
            .post(self.url("/login"))
            .json(&json!({ "userId": user_id }))
            .send()
            .await?;
        let body: LoginBody = Self::decode(response).await?;
        Ok(body.user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let response = self.http.get(self.url("/users")).send().await?;
        Self::decode(response).await
    }

    pub async fn list_projects(&self) -> Result<Vec<ProjectWithCreator>> {
        let response = self.http.get(self.url("/projects")).send().await?;
        Self::decode(response).await
    }

    pub async fn create_project(&self, name: &str, creator_id: &str) -> Result<ProjectWithCreator> {
        let response = self
            .http
            .post(self.url("/projects"))
            .json(&json!({ "name": name, "creatorId": creator_id }))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn get_project(&self, project_id: &str) -> Result<ProjectDetail> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{project_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn create_issue(&self, issue: &NewIssue) -> Result<IssueWithAssignee> {
        let response = self.http.post(self.url("/issues")).json(issue).send().await?;
        Self::decode(response).await
    }

    pub async fn get_issue(&self, project_id: &str, issue_id: &str) -> Result<IssueWithAssignee> {
        let response = self
            .http
            .get(self.url(&format!("/projects/{project_id}/issues/{issue_id}")))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn update_issue(
        &self,
        project_id: &str,
        issue_id: &str,
        update: &IssueUpdate,
    ) -> Result<IssueWithAssignee> {
        let response = self
            .http
            .put(self.url(&format!("/projects/{project_id}/issues/{issue_id}")))
            .json(update)
            .send()
            .await?;
        Self::decode(response).await
    }
}
