//! Shared Kernel
//!
//! Vocabulary every GreenMitra crate agrees on:
//! - [`error`]: the error taxonomy and its `{title, status, detail}` body
//! - [`id`]: typed UUID identifiers for users, reports and rewards
//! - `extract` (feature `axum`): JSON bodies that reject as `invalid data`
//!
//! The client crate depends on this without the `axum` feature.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
