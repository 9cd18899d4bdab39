//! Repositories: one per backend resource.
//!
//! A repository turns an already validated request into an `Endpoint` and
//! decodes the expected response. It performs no validation; use cases
//! validate first. Repositories are the seam stubbed in use-case tests.

pub mod comments;
pub mod suggestions;
pub mod version;

pub use comments::{ApiCommentRepository, CommentQuery, CommentRepository};
pub use suggestions::{ApiSuggestionRepository, SuggestionQuery, SuggestionRepository};
pub use version::{ApiVersionRepository, VersionRepository};

/// Relative API routes.
pub mod routes {
    pub const FETCH_SUGGESTIONS: &str = "/v1/sdk/suggestions/fetch";
    pub const CREATE_SUGGESTION: &str = "/v1/sdk/suggestions/create";
    pub const DELETE_SUGGESTION: &str = "/v1/sdk/suggestions/delete";
    pub const UPLOAD_IMAGE: &str = "/v1/sdk/suggestions/upload-image";
    pub const VOTE_STATUS: &str = "/v1/sdk/votes/status";
    pub const VOTE: &str = "/v1/sdk/votes/vote";
    pub const UNVOTE: &str = "/v1/sdk/votes/unvote";
    pub const FETCH_COMMENTS: &str = "/v1/sdk/comments/fetch";
    pub const CREATE_COMMENT: &str = "/v1/sdk/comments/create";
    pub const DELETE_COMMENT: &str = "/v1/sdk/comments/delete";
    pub const REPORT_VERSION: &str = "/v1/sdk/version/report";
}
