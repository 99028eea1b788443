pub mod auth;
pub mod issues;
pub mod projects;
pub mod users;
