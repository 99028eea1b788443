//! View state for the tracker's screens.
//!
//! Views fetch on `load` and re-fetch after their own mutations succeed;
//! nothing is patched locally. Failures surface as fixed, retry-oriented
//! messages regardless of cause.

use tracker_server::models::{
    IssueStatus, IssueWithAssignee, ProjectDetail, ProjectWithCreator, User,
};

use crate::{
    api::ApiClient,
    error::Result,
    session::Session,
    IssueUpdate, NewIssue,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Loadable<T> {
    fn settle(result: Result<T>, message: &str) -> Self {
        match result {
            Ok(data) => Self::Ready(data),
            Err(e) => {
                tracing::warn!(error = %e, "{message}");
                Self::Failed(message.to_string())
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Users offered by an assignee picker. A failed fetch is logged and leaves
/// the picker empty; the surrounding form stays usable.
async fn fetch_assignees(api: &ApiClient) -> Loadable<Vec<User>> {
    Loadable::settle(api.list_users().await, "Failed to fetch users")
}

fn picker_options(users: &Loadable<Vec<User>>) -> &[User] {
    users.data().map(Vec::as_slice).unwrap_or(&[])
}

#[derive(Debug, Default)]
pub struct ProjectListView {
    pub state: Loadable<Vec<ProjectWithCreator>>,
}

impl ProjectListView {
    pub async fn load(&mut self, api: &ApiClient) {
        self.state = Loadable::settle(
            api.list_projects().await,
            "Failed to load projects. Please try again.",
        );
    }
}

#[derive(Debug, Default)]
pub struct CreateProjectForm {
    pub name: String,
    pub error: Option<String>,
}

impl CreateProjectForm {
    /// Creates a project owned by the session user, then refreshes `list`.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        session: &Session,
        list: &mut ProjectListView,
    ) -> Option<ProjectWithCreator> {
        self.error = None;

        let Ok(creator) = session.require_user() else {
            self.error = Some("You must be logged in to create a project.".to_string());
            return None;
        };

        match api.create_project(&self.name, &creator.id).await {
            Ok(project) => {
                self.name.clear();
                list.load(api).await;
                Some(project)
            }
            Err(e) => {
                tracing::warn!(error = %e, "project creation failed");
                self.error = Some("Failed to create project. Please try again.".to_string());
                None
            }
        }
    }
}

#[derive(Debug)]
pub struct ProjectDetailView {
    pub project_id: String,
    pub state: Loadable<ProjectDetail>,
}

impl ProjectDetailView {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            state: Loadable::Loading,
        }
    }

    pub async fn load(&mut self, api: &ApiClient) {
        self.state = Loadable::settle(
            api.get_project(&self.project_id).await,
            "Failed to load project. Please try again.",
        );
    }
}

#[derive(Debug)]
pub struct CreateIssueForm {
    pub project_id: String,
    pub title: String,
    pub content: String,
    pub status: IssueStatus,
    pub assignee_id: String,
    pub users: Loadable<Vec<User>>,
    pub error: Option<String>,
}

impl CreateIssueForm {
    /// An empty form; the assignee defaults to whoever is logged in.
    pub fn new(project_id: impl Into<String>, session: &Session) -> Self {
        Self {
            project_id: project_id.into(),
            title: String::new(),
            content: String::new(),
            status: IssueStatus::default(),
            assignee_id: session
                .current_user()
                .map(|u| u.id.clone())
                .unwrap_or_default(),
            users: Loadable::Loading,
            error: None,
        }
    }

    pub async fn load_users(&mut self, api: &ApiClient) {
        self.users = fetch_assignees(api).await;
    }

    pub fn assignee_options(&self) -> &[User] {
        picker_options(&self.users)
    }

    /// Files the issue, then refreshes the project it was filed under.
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        project: &mut ProjectDetailView,
    ) -> Option<IssueWithAssignee> {
        self.error = None;

        let new_issue = NewIssue {
            title: self.title.clone(),
            content: self.content.clone(),
            status: self.status,
            project_id: self.project_id.clone(),
            assignee_id: self.assignee_id.clone(),
        };

        match api.create_issue(&new_issue).await {
            Ok(issue) => {
                self.title.clear();
                self.content.clear();
                self.status = IssueStatus::default();
                project.load(api).await;
                Some(issue)
            }
            Err(e) => {
                tracing::warn!(error = %e, "issue creation failed");
                self.error = Some("Failed to create issue. Please try again.".to_string());
                None
            }
        }
    }
}

/// A full local copy of an issue's mutable fields, submitted whole on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEditor {
    pub draft: IssueUpdate,
}

#[derive(Debug)]
pub struct IssueDetailView {
    pub project_id: String,
    pub issue_id: String,
    pub state: Loadable<IssueWithAssignee>,
    pub editor: Option<IssueEditor>,
    pub users: Loadable<Vec<User>>,
    pub error: Option<String>,
}

impl IssueDetailView {
    pub fn new(project_id: impl Into<String>, issue_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            issue_id: issue_id.into(),
            state: Loadable::Loading,
            editor: None,
            users: Loadable::Loading,
            error: None,
        }
    }

    /// Fetches the issue and the assignee picker's users.
    pub async fn load(&mut self, api: &ApiClient) {
        self.state = Loadable::settle(
            api.get_issue(&self.project_id, &self.issue_id).await,
            "Failed to load issue. Please try again.",
        );
        self.users = fetch_assignees(api).await;
    }

    pub fn assignee_options(&self) -> &[User] {
        picker_options(&self.users)
    }

    /// Enters edit mode with a copy of the loaded issue. Does nothing until
    /// the issue has loaded.
    pub fn begin_edit(&mut self) -> Option<&mut IssueEditor> {
        let loaded = self.state.data()?;
        let draft = IssueUpdate::from(&loaded.issue);
        Some(self.editor.insert(IssueEditor { draft }))
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn cancel_edit(&mut self) {
        self.editor = None;
    }

    /// Submits the whole draft. On success the server's copy replaces the
    /// view's and edit mode ends; on failure the draft is kept for retry.
    pub async fn save(&mut self, api: &ApiClient) -> bool {
        let Some(draft) = self.editor.as_ref().map(|e| e.draft.clone()) else {
            return false;
        };
        self.error = None;

        match api
            .update_issue(&self.project_id, &self.issue_id, &draft)
            .await
        {
            Ok(updated) => {
                self.state = Loadable::Ready(updated);
                self.editor = None;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "issue update failed");
                self.error = Some("Failed to update issue. Please try again.".to_string());
                false
            }
        }
    }
}
