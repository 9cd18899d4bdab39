//! Request and response types for the feedback backend API.
//!
//! All structs use camelCase serialization to match the API's JSON format.
//! Dates are carried as ISO-8601 strings and left unparsed.

use serde::{Deserialize, Serialize};

use crate::device::Platform;

/// Lifecycle status of a suggestion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionStatus {
    Pending,
    Accepted,
    Blocked,
    InProgress,
    Completed,
    Rejected,
}

impl SuggestionStatus {
    /// Votes are accepted only while a suggestion is still open.
    pub fn can_be_voted(&self) -> bool {
        matches!(
            self,
            SuggestionStatus::Pending | SuggestionStatus::Accepted | SuggestionStatus::InProgress
        )
    }

    /// Query-string value, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionStatus::Pending => "pending",
            SuggestionStatus::Accepted => "accepted",
            SuggestionStatus::Blocked => "blocked",
            SuggestionStatus::InProgress => "in-progress",
            SuggestionStatus::Completed => "completed",
            SuggestionStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for SuggestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SuggestionStatus::Pending),
            "accepted" => Ok(SuggestionStatus::Accepted),
            "blocked" => Ok(SuggestionStatus::Blocked),
            "in-progress" => Ok(SuggestionStatus::InProgress),
            "completed" => Ok(SuggestionStatus::Completed),
            "rejected" => Ok(SuggestionStatus::Rejected),
            other => Err(format!("unknown suggestion status '{}'", other)),
        }
    }
}

/// Where a suggestion was created.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    #[default]
    Sdk,
    Dashboard,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub id: String,
    pub app_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub status: SuggestionStatus,
    #[serde(default)]
    pub source: SuggestionSource,
    #[serde(default)]
    pub vote_count: i64,
    #[serde(default)]
    pub comment_count: i64,
    pub created_by: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Suggestion {
    /// `text` when present, otherwise `title`.
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.title.as_deref())
            .unwrap_or_default()
    }

    pub fn display_vote_count(&self) -> u64 {
        self.vote_count.max(0) as u64
    }

    pub fn display_comment_count(&self) -> u64 {
        self.comment_count.max(0) as u64
    }

    pub fn can_be_voted(&self) -> bool {
        self.status.can_be_voted()
    }

    pub fn is_from_sdk(&self) -> bool {
        self.device_id.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub suggestion_id: String,
    pub app_id: String,
    pub text: String,
    pub created_by: String,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Comment {
    pub fn display_name(&self) -> &str {
        self.nickname
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Anonymous")
    }

    pub fn is_from_sdk(&self) -> bool {
        self.device_id.is_some()
    }
}

/// Direction of a vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteType {
    Upvote,
    Downvote,
}

/// Response from GET /v1/sdk/votes/status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VoteStatus {
    pub has_voted: bool,
    pub vote_count: i64,
}

/// "Start after" marker for suggestion lists ordered by (voteCount, createdAt).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionCursor {
    pub vote_count: i64,
    pub created_at: String,
}

impl SuggestionCursor {
    /// Cursor pointing just past `suggestion`.
    pub fn after(suggestion: &Suggestion) -> Self {
        Self {
            vote_count: suggestion.vote_count,
            created_at: suggestion.created_at.clone(),
        }
    }
}

// ── Requests ──────────────────────────────────────────────────────────────

/// Body of POST /v1/sdk/suggestions/create.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateSuggestionRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    pub platform: Platform,
    pub language: String,
    pub user_is_premium: bool,
}

/// Body of POST /v1/sdk/suggestions/delete.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSuggestionRequest {
    pub suggestion_id: String,
    pub device_id: String,
}

/// Body of POST /v1/sdk/votes/vote and /v1/sdk/votes/unvote.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub suggestion_id: String,
    pub device_id: String,
    pub vote_type: VoteType,
    pub platform: Platform,
    pub language: String,
}

/// Body of POST /v1/sdk/comments/create.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub suggestion_id: String,
    pub text: String,
    pub device_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

/// Body of POST /v1/sdk/comments/delete.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCommentRequest {
    pub comment_id: String,
    pub device_id: String,
}

/// Body of POST /v1/sdk/suggestions/upload-image.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageRequest {
    /// `data:image/jpeg;base64,...` URL.
    pub image_data: String,
    pub file_name: String,
    pub mime_type: String,
}

/// Body of POST /v1/sdk/version/report.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionReportRequest {
    pub version: String,
    pub build_number: String,
    pub platform: Platform,
}

// ── Responses ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsPage {
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentsPage {
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment: Comment,
}

/// Response from the vote and unvote endpoints.
///
/// `suggestion`, when present, is the authoritative post-vote snapshot.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoteResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub vote_count: Option<i64>,
    #[serde(default)]
    pub suggestion: Option<Suggestion>,
}

/// Generic `{success, message}` acknowledgement used by delete endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VersionReportResponse {
    #[serde(default)]
    pub success: bool,
}

/// Error body returned alongside 4xx/5xx statuses.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
