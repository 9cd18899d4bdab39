//! View-state owned by list and detail surfaces.
//!
//! Nothing here is shared between views. A detail view works on its own
//! copy of a suggestion and hands its changes back through
//! [`SuggestionDetailState::dismiss`], which the list folds in with
//! [`SuggestionListState::reconcile_detail`].

pub mod detail;
pub mod list;
pub mod votes;


pub use detail::{DetailChanges, SuggestionDetailState};
pub use list::SuggestionListState;
pub use votes::{VoteMap, VoteTicket};

/// Page size used by list and detail surfaces unless told otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
