//! Core types: errors, configuration and session state

pub mod config;
pub mod error;
pub mod session;
