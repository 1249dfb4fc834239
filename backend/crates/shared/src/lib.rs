//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by the
//! `auth` and `prompts` crates:
//! - Common error types and result aliases
//! - Typed opaque identifiers
//! - Offset pagination rules
//! - JSON and query extractors that reject with problem bodies
//!
//! **Design Principle**: Only include things that have one meaning across
//! every domain crate.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
pub mod pagination;
