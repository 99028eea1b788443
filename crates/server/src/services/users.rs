use sqlx::SqlitePool;

use crate::{
    db::models::User,
    error::{AppError, Result},
};

pub async fn find_user(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn require_user(pool: &SqlitePool, id: &str) -> Result<User> {
    find_user(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Find-or-create. Repeated logins with the same id return the same user.
pub async fn login(pool: &SqlitePool, user_id: &str) -> Result<User> {
    let inserted = sqlx::query(
        "INSERT INTO users (id, created_at) VALUES (?, ?) ON CONFLICT(id) DO NOTHING",
    )
    .bind(user_id)
    .bind(super::now())
    .execute(pool)
    .await?
    .rows_affected();

    if inserted > 0 {
        tracing::info!(user_id, "user created on first login");
    }

    find_user(pool, user_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("user {user_id} vanished after login")))
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT id, created_at FROM users ORDER BY id ASC")
        .fetch_all(pool)
        .await?;
    Ok(users)
}
