use axum::{
    extract::{Path, State},
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{
    db::models::{IssueWithAssignee, ProjectDetail, ProjectWithCreator},
    error::{Json, Result},
    services::{
        issues::{self, IssueUpdate},
        projects,
    },
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/:id", get(get_project))
        .route("/:id/issues/:issue_id", get(get_issue).put(update_issue))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub creator_id: String,
}

#[derive(Debug, Deserialize)]
pub struct IssuePathParams {
    pub id: String,
    pub issue_id: String,
}

async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<ProjectWithCreator>>> {
    let projects = projects::list_projects(&state.db.pool)
        .await
        .map_err(|e| e.failed("Failed to fetch projects"))?;
    Ok(Json(projects))
}

async fn create_project(
    State(state): State<AppState>,
    body: Result<Json<CreateProjectRequest>>,
) -> Result<Json<ProjectWithCreator>> {
    let Json(body) = body.map_err(|e| e.failed("Failed to create project"))?;
    let project = projects::create_project(&state.db.pool, &body.name, &body.creator_id)
        .await
        .map_err(|e| e.failed("Failed to create project"))?;
    Ok(Json(project))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProjectDetail>> {
    let project = projects::get_project(&state.db.pool, &id)
        .await
        .map_err(|e| e.failed("Failed to fetch project"))?;
    Ok(Json(project))
}

async fn get_issue(
    State(state): State<AppState>,
    Path(params): Path<IssuePathParams>,
) -> Result<Json<IssueWithAssignee>> {
    let issue = issues::get_issue(&state.db.pool, &params.id, &params.issue_id)
        .await
        .map_err(|e| e.failed("Failed to fetch issue"))?;
    Ok(Json(issue))
}

async fn update_issue(
    State(state): State<AppState>,
    Path(params): Path<IssuePathParams>,
    body: Result<Json<IssueUpdate>>,
) -> Result<Json<IssueWithAssignee>> {
    let Json(body) = body.map_err(|e| e.failed("Failed to update issue"))?;
    let issue = issues::update_issue(&state.db.pool, &params.id, &params.issue_id, body)
        .await
        .map_err(|e| e.failed("Failed to update issue"))?;
    Ok(Json(issue))
}
