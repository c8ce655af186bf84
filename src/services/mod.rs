//! Service layer for business logic.
//!
//! This module contains services that coordinate the token engine with
//! persistence and the content generation collaborator.

pub mod apply;
pub mod entries;
pub mod generation;
pub mod token_store;

// Re-export commonly used types and functions
pub use apply::{ApplyRequest, ApplyResult, ApplyService, ListQuery, PreviewResponse};
pub use generation::{generate_content, CommandGenerator, ContentGenerator, GenerateRequest};
pub use token_store::TokenStore;
