use serde::{Deserialize, Serialize};

/// Workflow state of an issue. Any state may move to any other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// A user is known only by the id it logged in with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: IssueStatus,
    pub project_id: String,
    pub assignee_id: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectWithCreator {
    #[serde(flatten)]
    pub project: Project,
    pub creator: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueWithAssignee {
    #[serde(flatten)]
    pub issue: Issue,
    pub assignee: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: Project,
    pub creator: User,
    pub issues: Vec<IssueWithAssignee>,
}

// Row shapes for joined reads

#[derive(sqlx::FromRow)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub creator_id: String,
    pub created_at: String,
    pub creator_created_at: String,
}

impl From<ProjectRow> for ProjectWithCreator {
    fn from(row: ProjectRow) -> Self {
        Self {
            creator: User {
                id: row.creator_id.clone(),
                created_at: row.creator_created_at,
            },
            project: Project {
                id: row.id,
                name: row.name,
                creator_id: row.creator_id,
                created_at: row.created_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct IssueRow {
    pub id: String,
    pub title: String,
    pub content: String,
    pub status: IssueStatus,
    pub project_id: String,
    pub assignee_id: String,
    pub created_at: String,
    pub updated_at: String,
    pub assignee_created_at: String,
}

impl From<IssueRow> for IssueWithAssignee {
    fn from(row: IssueRow) -> Self {
        Self {
            assignee: User {
                id: row.assignee_id.clone(),
                created_at: row.assignee_created_at,
            },
            issue: Issue {
                id: row.id,
                title: row.title,
                content: row.content,
                status: row.status,
                project_id: row.project_id,
                assignee_id: row.assignee_id,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}
