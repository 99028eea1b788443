use axum::{extract::State, routing::post, Router};

use crate::{
    db::models::IssueWithAssignee,
    error::{Json, Result},
    services::issues::{self, NewIssue},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(create_issue))
}

async fn create_issue(
    State(state): State<AppState>,
    body: Result<Json<NewIssue>>,
) -> Result<Json<IssueWithAssignee>> {
    let Json(body) = body.map_err(|e| e.failed("Failed to create issue"))?;
    let issue = issues::create_issue(&state.db.pool, body)
        .await
        .map_err(|e| e.failed("Failed to create issue"))?;
    Ok(Json(issue))
}
