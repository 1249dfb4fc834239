//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;


pub use handlers::PromptsAppState;
pub use router::{prompts_router, prompts_router_generic};
