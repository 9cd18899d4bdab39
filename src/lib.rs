//! Client core for a feature-suggestion, voting and comment service.
//!
//! Layers, bottom up: configuration and device identity, the signed HTTP
//! client, repositories, use cases, and the view-state reconcilers that
//! merge server responses into list and detail surfaces.

pub mod api;
pub mod config;
pub mod context;
pub mod device;
pub mod error;
pub mod pagination;
pub mod repository;
pub mod state;
pub mod storage;
pub mod usecase;

#[cfg(test)]
mod testing;

pub use api::types::{Comment, Suggestion, SuggestionCursor, SuggestionStatus, VoteStatus, VoteType};
pub use config::{ConfigStore, SdkOptions};
pub use context::{FeedbackSdk, SdkContext};
pub use device::{DeviceIdentityProvider, Platform};
pub use error::{Result, SdkError};
pub use pagination::{PageState, Paginator};
pub use state::{SuggestionDetailState, SuggestionListState, VoteMap};
pub use storage::{KeychainStore, MemoryStore, PreferenceStore};
