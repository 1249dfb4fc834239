//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Prompt, Language, Review) and read models
//! - Domain value objects (ids, statuses, slugs, engagement kinds)
//! - Domain services (create/edit validation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
