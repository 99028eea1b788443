use futures::future::try_join;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    db::models::{Issue, IssueRow, IssueStatus, IssueWithAssignee},
    error::{AppError, Result},
};

use super::{projects, users};

const SELECT_ISSUE: &str = r#"
    SELECT i.id, i.title, i.content, i.status, i.project_id, i.assignee_id,
           i.created_at, i.updated_at, u.created_at AS assignee_created_at
    FROM issues i
    JOIN users u ON u.id = i.assignee_id
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub title: String,
    pub content: String,
    pub status: IssueStatus,
    pub project_id: String,
    pub assignee_id: String,
}

/// Replacement values for every mutable field of an issue. The owning
/// project is not part of the payload; it scopes the update instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdate {
    pub title: String,
    pub content: String,
    pub status: IssueStatus,
    pub assignee_id: String,
}

impl From<&Issue> for IssueUpdate {
    fn from(issue: &Issue) -> Self {
        Self {
            title: issue.title.clone(),
            content: issue.content.clone(),
            status: issue.status,
            assignee_id: issue.assignee_id.clone(),
        }
    }
}

pub async fn create_issue(pool: &SqlitePool, new: NewIssue) -> Result<IssueWithAssignee> {
    let (project_exists, assignee) = try_join(
        projects::project_exists(pool, &new.project_id),
        users::find_user(pool, &new.assignee_id),
    )
    .await?;

    if !project_exists {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    let assignee = assignee.ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let now = super::now();
    let issue = Issue {
        id: Uuid::new_v4().to_string(),
        title: new.title,
        content: new.content,
        status: new.status,
        project_id: new.project_id,
        assignee_id: new.assignee_id,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO issues (id, title, content, status, project_id, assignee_id, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&issue.id)
    .bind(&issue.title)
    .bind(&issue.content)
    .bind(issue.status)
    .bind(&issue.project_id)
    .bind(&issue.assignee_id)
    .bind(&issue.created_at)
    .bind(&issue.updated_at)
    .execute(pool)
    .await?;

    tracing::info!(
        issue_id = %issue.id,
        project_id = %issue.project_id,
        status = ?issue.status,
        "issue created"
    );

    Ok(IssueWithAssignee { issue, assignee })
}

/// Scoped lookup: the issue is only visible through the project it belongs to.
pub async fn get_issue(
    pool: &SqlitePool,
    project_id: &str,
    issue_id: &str,
) -> Result<IssueWithAssignee> {
    let row = sqlx::query_as::<_, IssueRow>(&format!(
        "{SELECT_ISSUE} WHERE i.id = ? AND i.project_id = ?"
    ))
    .bind(issue_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Issue not found".to_string()))?;

    Ok(row.into())
}

pub async fn list_project_issues(
    pool: &SqlitePool,
    project_id: &str,
) -> Result<Vec<IssueWithAssignee>> {
    let rows = sqlx::query_as::<_, IssueRow>(&format!(
        "{SELECT_ISSUE} WHERE i.project_id = ? ORDER BY i.created_at ASC"
    ))
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Overwrites title, content, status and assignee of the issue matching
/// both ids. Status may move freely between any two values.
pub async fn update_issue(
    pool: &SqlitePool,
    project_id: &str,
    issue_id: &str,
    update: IssueUpdate,
) -> Result<IssueWithAssignee> {
    users::require_user(pool, &update.assignee_id).await?;

    let updated = sqlx::query(
        r#"
        UPDATE issues
        SET title = ?, content = ?, status = ?, assignee_id = ?, updated_at = ?
        WHERE id = ? AND project_id = ?
        "#,
    )
    .bind(&update.title)
    .bind(&update.content)
    .bind(update.status)
    .bind(&update.assignee_id)
    .bind(super::now())
    .bind(issue_id)
    .bind(project_id)
    .execute(pool)
    .await?
    .rows_affected();

    if updated == 0 {
        return Err(AppError::NotFound("Issue not found".to_string()));
    }

    tracing::info!(issue_id, project_id, status = ?update.status, "issue updated");

    get_issue(pool, project_id, issue_id).await
}
