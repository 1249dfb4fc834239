//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod check_session;
pub mod config;
pub mod guard;
pub mod manage_users;
pub mod profile;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use guard::require_role;
pub use manage_users::ManageUsersUseCase;
pub use profile::{ProfileUseCase, UpdateSettingsInput};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::TokenService;
