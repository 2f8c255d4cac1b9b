//! Domain layer - Core business entities
//!
//! The `User` resource and the payload clients send to create or
//! update it. No infrastructure concerns live here.

pub mod user;

pub use user::{User, UserPayload};
