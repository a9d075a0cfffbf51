//! Query life cycle
//!
//! One question at a time: `Idle → Pending → Settled`. The machine is the
//! re-entrancy guard: while a submission is pending, further submissions
//! are no-ops rather than queued. Each accepted submission gets a fresh
//! generation number, which also invalidates the citation bindings built
//! for any earlier answer.

use crate::core::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryState {
    Idle,
    Pending,
    Settled,
}

/// One accepted submission: the literal trimmed input plus its generation
#[derive(Debug, Clone)]
pub struct Submission {
    pub text: String,
    pub generation: u64,
}

/// State machine governing one query's pending/settled states
#[derive(Debug)]
pub struct QueryLifecycle {
    state: QueryState,
    generation: u64,
}

impl QueryLifecycle {
    pub fn new() -> Self {
        Self {
            state: QueryState::Idle,
            generation: 0,
        }
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    /// The busy flag: true while a submission is in flight
    pub fn is_pending(&self) -> bool {
        self.state == QueryState::Pending
    }

    /// Generation of the most recently accepted submission
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Accept a submission.
    ///
    /// Empty-after-trim input is a validation error, surfaced before any
    /// request. A submission while another is pending returns `Ok(None)`:
    /// no placeholder, no request, nothing observable.
    pub fn begin(&mut self, input: &str) -> Result<Option<Submission>> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::validation("Type a question before sending"));
        }

        if self.is_pending() {
            return Ok(None);
        }

        self.generation += 1;
        self.state = QueryState::Pending;
        Ok(Some(Submission {
            text: trimmed.to_string(),
            generation: self.generation,
        }))
    }

    /// Release the busy state. Called on every settle path, success or
    /// error; idempotent.
    pub fn settle(&mut self) {
        if self.state == QueryState::Pending {
            self.state = QueryState::Settled;
        }
    }
}

impl Default for QueryLifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_rejected() {
        let mut query = QueryLifecycle::new();
        assert!(query.begin("   ").unwrap_err().is_validation());
        assert_eq!(query.state(), QueryState::Idle);
    }

    #[test]
    fn test_submission_trims_and_goes_pending() {
        let mut query = QueryLifecycle::new();
        let sub = query.begin("  ¿De qué trata el capítulo 3?  ").unwrap().unwrap();
        assert_eq!(sub.text, "¿De qué trata el capítulo 3?");
        assert!(query.is_pending());
    }

    #[test]
    fn test_second_submission_while_pending_is_noop() {
        let mut query = QueryLifecycle::new();
        let first = query.begin("primera").unwrap().unwrap();
        assert!(query.begin("segunda").unwrap().is_none());
        // The pending generation is still the first one
        assert_eq!(query.generation(), first.generation);
    }

    #[test]
    fn test_settle_releases_busy_on_both_paths() {
        let mut query = QueryLifecycle::new();
        query.begin("pregunta").unwrap().unwrap();
        query.settle();
        assert!(!query.is_pending());
        assert_eq!(query.state(), QueryState::Settled);

        // A new submission is accepted afterwards, with a fresh generation
        let next = query.begin("otra").unwrap().unwrap();
        assert_eq!(next.generation, 2);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let mut query = QueryLifecycle::new();
        query.settle();
        assert_eq!(query.state(), QueryState::Idle);
    }
}
