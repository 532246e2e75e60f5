//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id with salt and optional pepper)
//! - Environment-driven configuration helpers

pub mod config;
pub mod password;
