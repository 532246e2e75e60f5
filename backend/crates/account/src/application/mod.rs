//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_user;
pub mod login;
pub mod register;

// Re-exports
pub use config::AccountConfig;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
