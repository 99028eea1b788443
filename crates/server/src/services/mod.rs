//! Domain operations over users, projects and issues.
//!
//! Each call re-reads storage; nothing is cached between requests. Referenced
//! users and projects are checked here before writes so that a missing
//! reference surfaces as `NotFound` rather than a constraint violation.

pub mod issues;
pub mod projects;
pub mod users;

use chrono::Utc;

fn now() -> String {
    Utc::now().to_rfc3339()
}
