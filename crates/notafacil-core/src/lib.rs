//! # notafacil-core
//!
//! Core types, validation rules, and repository traits for notafacil.
//!
//! This crate holds the Note and Tag entities and the persistence contracts
//! that the storage and transport crates build on. It never touches a
//! database or a socket itself.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod models;
pub mod traits;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result, ValidationError};
pub use models::*;
pub use traits::*;
