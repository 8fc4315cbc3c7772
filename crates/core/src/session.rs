//! In-memory state of one tracker session.

use thiserror::Error;

use crate::filter::{DifficultyFilter, ViewFilter};
use crate::model::{CompletionMap, ProblemKey, UserIdentity};
use crate::sections::SectionVisibility;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionStateError {
    #[error("an active session is required")]
    NotSignedIn,
}

/// Marks a progress load started for a specific sign-in.
///
/// Results carrying an outdated ticket are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket(u64);

/// Identity, completion flags, and view controls for one window.
///
/// Completion is only kept while an identity is present: signing out clears it,
/// and it cannot be written without an identity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    identity: Option<UserIdentity>,
    completion: CompletionMap,
    search_term: String,
    difficulty: DifficultyFilter,
    sections: SectionVisibility,
    epoch: u64,
}

impl SessionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn identity(&self) -> Option<&UserIdentity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub fn completion(&self) -> &CompletionMap {
        &self.completion
    }

    /// Switches to `identity` and returns the ticket its load must present.
    ///
    /// Completion is cleared when the user changes; re-announcing the same
    /// user keeps the current flags until the load lands.
    pub fn sign_in(&mut self, identity: UserIdentity) -> LoadTicket {
        let same_user = self
            .identity
            .as_ref()
            .is_some_and(|current| current.id() == identity.id());
        if !same_user {
            self.completion.clear();
        }
        self.identity = Some(identity);
        self.epoch += 1;
        LoadTicket(self.epoch)
    }

    /// Clears identity and completion. Filters and collapse state are kept.
    pub fn sign_out(&mut self) {
        self.identity = None;
        self.completion.clear();
        self.epoch += 1;
    }

    /// Installs a loaded map if `ticket` still belongs to the current sign-in.
    pub fn apply_loaded(&mut self, ticket: LoadTicket, completion: CompletionMap) -> bool {
        if self.identity.is_none() || ticket.0 != self.epoch {
            return false;
        }
        self.completion = completion;
        true
    }

    /// Overwrites a single flag locally.
    ///
    /// # Errors
    ///
    /// Returns `SessionStateError::NotSignedIn` when no identity is present.
    pub fn set_completed(
        &mut self,
        key: ProblemKey,
        completed: bool,
    ) -> Result<&CompletionMap, SessionStateError> {
        if self.identity.is_none() {
            return Err(SessionStateError::NotSignedIn);
        }
        self.completion.set(key, completed);
        Ok(&self.completion)
    }

    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    #[must_use]
    pub fn difficulty(&self) -> DifficultyFilter {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: DifficultyFilter) {
        self.difficulty = difficulty;
    }

    pub fn reset_filters(&mut self) {
        self.search_term.clear();
        self.difficulty = DifficultyFilter::All;
    }

    #[must_use]
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter::new(&self.search_term, self.difficulty)
    }

    #[must_use]
    pub fn sections(&self) -> &SectionVisibility {
        &self.sections
    }

    pub fn sections_mut(&mut self) -> &mut SectionVisibility {
        &mut self.sections
    }
}
