use tracker_core::filter::DifficultyFilter;
use tracker_core::model::ProblemKey;
use tracker_core::session::SessionState;

/// User actions on the tracker page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerIntent {
    SignIn,
    SignOut,
    Toggle { key: ProblemKey, completed: bool },
    Search(String),
    Difficulty(DifficultyFilter),
    ToggleSection(usize),
    ToggleAll,
    ResetFilters,
    Retry,
}

/// Apply an intent that only touches local view state.
///
/// Returns `false` for intents that need a service (auth, toggles, retry); the
/// caller handles those.
pub fn apply_local(session: &mut SessionState, intent: &TrackerIntent, step_count: usize) -> bool {
    match intent {
        TrackerIntent::Search(term) => session.set_search_term(term.as_str()),
        TrackerIntent::Difficulty(filter) => session.set_difficulty(*filter),
        TrackerIntent::ToggleSection(index) => session.sections_mut().toggle_one(*index),
        TrackerIntent::ToggleAll => {
            session.sections_mut().toggle_all(step_count);
        }
        TrackerIntent::ResetFilters => session.reset_filters(),
        TrackerIntent::SignIn
        | TrackerIntent::SignOut
        | TrackerIntent::Toggle { .. }
        | TrackerIntent::Retry => return false,
    }
    true
}
