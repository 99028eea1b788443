use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    db::models::{Project, ProjectDetail, ProjectRow, ProjectWithCreator},
    error::{AppError, Result},
};

use super::{issues, users};

const SELECT_PROJECT: &str = r#"
    SELECT p.id, p.name, p.creator_id, p.created_at, u.created_at AS creator_created_at
    FROM projects p
    JOIN users u ON u.id = p.creator_id
"#;

pub async fn create_project(
    pool: &SqlitePool,
    name: &str,
    creator_id: &str,
) -> Result<ProjectWithCreator> {
    let creator = users::require_user(pool, creator_id).await?;

    let project = Project {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        creator_id: creator.id.clone(),
        created_at: super::now(),
    };

    sqlx::query("INSERT INTO projects (id, name, creator_id, created_at) VALUES (?, ?, ?, ?)")
        .bind(&project.id)
        .bind(&project.name)
        .bind(&project.creator_id)
        .bind(&project.created_at)
        .execute(pool)
        .await?;

    tracing::info!(project_id = %project.id, creator_id, "project created");

    Ok(ProjectWithCreator { project, creator })
}

/// All projects with their creators. Row order is whatever storage returns.
pub async fn list_projects(pool: &SqlitePool) -> Result<Vec<ProjectWithCreator>> {
    let rows = sqlx::query_as::<_, ProjectRow>(SELECT_PROJECT)
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

pub async fn find_project(pool: &SqlitePool, id: &str) -> Result<Option<ProjectWithCreator>> {
    let row = sqlx::query_as::<_, ProjectRow>(&format!("{SELECT_PROJECT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Into::into))
}

pub async fn project_exists(pool: &SqlitePool, id: &str) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// One project with its creator and every issue filed under it.
pub async fn get_project(pool: &SqlitePool, id: &str) -> Result<ProjectDetail> {
    let ProjectWithCreator { project, creator } = find_project(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    let issues = issues::list_project_issues(pool, &project.id).await?;

    Ok(ProjectDetail {
        project,
        creator,
        issues,
    })
}
