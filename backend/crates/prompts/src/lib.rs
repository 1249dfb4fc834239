//! Prompts Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Prompt authoring with a PENDING / PUBLISHED / REJECTED moderation lifecycle
//! - Append-only review records for every publish or reject decision
//! - Like and favorite relations with cached counters
//! - Language catalogue, popularity scores and aggregate stats
//!
//! ## Consistency Model
//! - A toggle changes the relation and its counter in one statement
//! - Counters never drop below zero and can be rebuilt from the relation sets
//! - Deleting a prompt removes its relations and reviews first

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PromptsConfig;
pub use error::{PromptError, PromptResult};
pub use infra::postgres::PgPromptRepository;
pub use presentation::handlers::PromptsAppState;
pub use presentation::router::prompts_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
