//! Conversation orchestration: query life cycle, transcript, citations,
//! text formatting and the modal panel surface

pub mod citations;
pub mod format;
pub mod lifecycle;
pub mod panel;
pub mod transcript;

pub use citations::CitationIndex;
pub use lifecycle::{QueryLifecycle, QueryState, Submission};
pub use panel::{Panel, PanelContent};
pub use transcript::{Entry, Transcript};
