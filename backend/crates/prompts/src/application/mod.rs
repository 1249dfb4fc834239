//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod create_prompt;
pub mod delete_prompt;
pub mod languages;
pub mod list_prompts;
pub mod moderate_prompt;
pub mod recount;
pub mod toggle_engagement;
pub mod update_prompt;

// Re-exports
pub use config::PromptsConfig;
pub use create_prompt::{CreatePromptInput, CreatePromptUseCase};
pub use delete_prompt::DeletePromptUseCase;
pub use languages::{CreateLanguageInput, LanguageCatalogue, LanguagesUseCase};
pub use list_prompts::{ListPromptsUseCase, ListQuery};
pub use moderate_prompt::{ListReviewsUseCase, ModerateInput, ModeratePromptUseCase};
pub use recount::RecountUseCase;
pub use toggle_engagement::ToggleEngagementUseCase;
pub use update_prompt::{EditScope, UpdatePromptInput, UpdatePromptUseCase};
