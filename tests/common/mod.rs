//! Common test utilities and helpers
//!
//! - Custom assertion macros
//! - A test server over the in-memory store and fixture keys
//! - Shortcuts for registering, logging in and reading the session cookie

#![allow(dead_code)]

#[macro_use]
pub mod assertions;
pub mod auth_helpers;

pub use auth_helpers::*;
