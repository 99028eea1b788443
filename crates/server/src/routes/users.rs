use axum::{extract::State, routing::get, Router};

use crate::{
    db::models::User,
    error::{Json, Result},
    services::users,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_users))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = users::list_users(&state.db.pool)
        .await
        .map_err(|e| e.failed("Failed to fetch users"))?;
    Ok(Json(users))
}
