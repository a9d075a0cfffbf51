//! Output rendering

pub mod human;
pub mod json;
