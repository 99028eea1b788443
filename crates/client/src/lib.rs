//! Client side of the issue tracker: a typed HTTP client, the logged-in
//! session, and the view state that forms and lists are built on.

pub mod api;
pub mod error;
pub mod session;
pub mod views;

pub use api::ApiClient;
pub use error::{ClientError, Result};
pub use session::Session;
pub use tracker_server::models;
pub use tracker_server::services::issues::{IssueUpdate, NewIssue};
