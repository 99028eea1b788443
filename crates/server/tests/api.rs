use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use tracker_server::{build_router, db::Database, AppState};

async fn test_app() -> Router {
    let db = Database::in_memory().await.unwrap();
    db.run_migrations().await.unwrap();
    build_router(AppState { db })
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

async fn login(app: &Router, user_id: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/login",
        Some(json!({ "userId": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn create_project(app: &Router, name: &str, creator_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": name, "creatorId": creator_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_string()
}

async fn create_issue(app: &Router, project_id: &str, assignee_id: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/issues",
        Some(json!({
            "title": "Fix bug",
            "content": "desc",
            "status": "TODO",
            "projectId": project_id,
            "assigneeId": assignee_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn health_check_responds() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

#[tokio::test]
async fn login_twice_returns_the_same_user() {
    let app = test_app().await;

    let first = login(&app, "alice").await;
    let second = login(&app, "alice").await;

    assert_eq!(first["user"]["id"], "alice");
    assert_eq!(first, second);

    let (_, users) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_project_with_unknown_creator_is_404() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "Roadmap", "creatorId": "nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn malformed_bodies_fail_with_the_route_message() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/login", Some(json!({}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Login failed" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create project" }));
}

#[tokio::test]
async fn empty_names_and_titles_are_accepted() {
    let app = test_app().await;
    login(&app, "alice").await;

    let project_id = create_project(&app, "", "alice").await;

    let (status, issue) = send(
        &app,
        Method::POST,
        "/api/issues",
        Some(json!({
            "title": "",
            "content": "",
            "status": "TODO",
            "projectId": project_id,
            "assigneeId": "alice",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(issue["title"], "");

    let (_, detail) = send(&app, Method::GET, &format!("/api/projects/{project_id}"), None).await;
    assert_eq!(detail["name"], "");
    assert_eq!(detail["issues"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = test_app().await;
    login(&app, "alice").await;
    let project_id = create_project(&app, "Roadmap", "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/issues",
        Some(json!({
            "title": "t",
            "content": "c",
            "status": "BLOCKED",
            "projectId": project_id,
            "assigneeId": "alice",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to create issue" }));
}

#[tokio::test]
async fn create_issue_with_unknown_references_is_404() {
    let app = test_app().await;
    login(&app, "alice").await;
    let project_id = create_project(&app, "Roadmap", "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/issues",
        Some(json!({
            "title": "t",
            "content": "c",
            "status": "TODO",
            "projectId": project_id,
            "assigneeId": "ghost",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/issues",
        Some(json!({
            "title": "t",
            "content": "c",
            "status": "TODO",
            "projectId": "missing",
            "assigneeId": "alice",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");
}

#[tokio::test]
async fn issue_is_not_visible_through_another_project() {
    let app = test_app().await;
    login(&app, "alice").await;
    let project_a = create_project(&app, "A", "alice").await;
    let project_b = create_project(&app, "B", "alice").await;
    let issue = create_issue(&app, &project_a, "alice").await;
    let issue_id = issue["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{project_a}/issues/{issue_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/projects/{project_b}/issues/{issue_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Issue not found");
}

#[tokio::test]
async fn update_then_get_round_trips_all_fields() {
    let app = test_app().await;
    login(&app, "alice").await;
    login(&app, "userX").await;
    let project_id = create_project(&app, "Roadmap", "alice").await;
    let issue = create_issue(&app, &project_id, "alice").await;
    let issue_path = format!("/api/projects/{project_id}/issues/{}", issue["id"].as_str().unwrap());

    let (status, _) = send(
        &app,
        Method::PUT,
        &issue_path,
        Some(json!({
            "title": "T2",
            "content": "C2",
            "status": "DONE",
            "assigneeId": "userX",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(&app, Method::GET, &issue_path, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "T2");
    assert_eq!(fetched["content"], "C2");
    assert_eq!(fetched["status"], "DONE");
    assert_eq!(fetched["assigneeId"], "userX");
    assert_eq!(fetched["assignee"]["id"], "userX");
}

#[tokio::test]
async fn update_requires_every_mutable_field() {
    let app = test_app().await;
    login(&app, "alice").await;
    let project_id = create_project(&app, "Roadmap", "alice").await;
    let issue = create_issue(&app, &project_id, "alice").await;
    let issue_path = format!("/api/projects/{project_id}/issues/{}", issue["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &issue_path,
        Some(json!({ "status": "DONE" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to update issue" }));

    let (_, fetched) = send(&app, Method::GET, &issue_path, None).await;
    assert_eq!(fetched["title"], "Fix bug");
    assert_eq!(fetched["status"], "TODO");
}

#[tokio::test]
async fn roadmap_scenario_end_to_end() {
    let app = test_app().await;

    let login_body = login(&app, "alice").await;
    assert_eq!(login_body["user"]["id"], "alice");

    let (status, project) = send(
        &app,
        Method::POST,
        "/api/projects",
        Some(json!({ "name": "Roadmap", "creatorId": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(project["name"], "Roadmap");
    assert_eq!(project["creator"]["id"], "alice");
    let project_id = project["id"].as_str().unwrap().to_string();

    let issue = create_issue(&app, &project_id, "alice").await;
    assert_eq!(issue["status"], "TODO");
    let issue_id = issue["id"].as_str().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/projects/{project_id}/issues/{issue_id}"),
        Some(json!({
            "title": "Fix bug",
            "content": "desc",
            "status": "IN_PROGRESS",
            "assigneeId": "alice",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "IN_PROGRESS");

    let (status, detail) = send(&app, Method::GET, &format!("/api/projects/{project_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["creator"]["id"], "alice");
    let issues = detail["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["status"], "IN_PROGRESS");
    assert_eq!(issues[0]["assignee"]["id"], "alice");

    let (status, listed) = send(&app, Method::GET, "/api/projects", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["creator"]["id"], "alice");
}

#[tokio::test]
async fn unknown_project_is_404() {
    let app = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/projects/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Project not found" }));
}
