//! Corpus management: chapter catalog, uploads and the comparison
//! selection

pub mod catalog;
pub mod compare;
pub mod upload;

pub use catalog::ChapterCatalog;
pub use compare::ComparisonSelectionSet;
pub use upload::{UploadLifecycle, UploadState};
