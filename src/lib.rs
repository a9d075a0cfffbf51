//! Tome - terminal client for a retrieval-augmented document backend
//!
//! Upload documents, ask free-text questions with cited answers, list
//! and summarize chapters, and compare chapters across books. The
//! backend is reached only through its fixed HTTP contract; everything
//! stateful here is session orchestration.

pub mod api;
pub mod chat;
pub mod cli;
pub mod core;
pub mod library;
pub mod notify;
pub mod output;

pub use crate::core::config::Config;
pub use crate::core::error::{Error, Result};
pub use crate::core::session::SessionState;
