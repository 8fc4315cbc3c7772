use tracker_core::filter::DifficultyFilter;
use tracker_core::model::{Curriculum, ProblemKey, UserIdentity};
use tracker_core::progress::{stats, step_stats};
use tracker_core::session::SessionState;

use super::problem_vm::ProblemVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthVm {
    pub name: String,
    pub initial: char,
}

impl AuthVm {
    #[must_use]
    pub fn new(identity: &UserIdentity) -> Self {
        Self {
            name: identity.display_name_or_default().to_owned(),
            initial: identity.initial(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsVm {
    pub total: usize,
    pub completed: usize,
    pub rate: u32,
    pub level: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StepVm {
    pub index: usize,
    pub title: String,
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
    pub rounded_percentage: u32,
    pub collapsed: bool,
    pub problems: Vec<ProblemVm>,
}

impl StepVm {
    #[must_use]
    pub fn bar_style(&self) -> String {
        format!("width: {}%", self.percentage)
    }
}

/// Everything the tracker page shows, derived from the curriculum and session.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerVm {
    /// `None` while signed out.
    pub auth: Option<AuthVm>,
    /// Only present while signed in.
    pub stats: Option<StatsVm>,
    pub search_term: String,
    pub difficulty: DifficultyFilter,
    pub all_collapsed: bool,
    pub steps: Vec<StepVm>,
}

impl TrackerVm {
    #[must_use]
    pub fn can_toggle(&self) -> bool {
        self.auth.is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn collapse_label(&self) -> &'static str {
        if self.all_collapsed {
            "Expand All"
        } else {
            "Collapse All"
        }
    }
}

#[must_use]
pub fn build_tracker_vm(curriculum: &Curriculum, session: &SessionState) -> TrackerVm {
    let completion = session.completion();
    let auth = session.identity().map(AuthVm::new);
    let stats = auth.as_ref().map(|_| {
        let stats = stats(completion, curriculum);
        StatsVm {
            total: stats.total,
            completed: stats.completed,
            rate: stats.rate,
            level: stats.level(),
        }
    });

    let steps = session
        .view_filter()
        .visible_steps(curriculum)
        .into_iter()
        .map(|visible| {
            let step_stats = step_stats(completion, visible.step, visible.index);
            let problems = visible
                .problems
                .iter()
                .map(|item| {
                    let key = ProblemKey::new(visible.index, item.index);
                    ProblemVm::new(key, item.problem, completion)
                })
                .collect();
            StepVm {
                index: visible.index,
                title: visible.step.title.clone(),
                completed: step_stats.completed,
                total: step_stats.total,
                percentage: step_stats.percentage,
                rounded_percentage: step_stats.rounded_percentage(),
                collapsed: session.sections().is_collapsed(visible.index),
                problems,
            }
        })
        .collect();

    TrackerVm {
        auth,
        stats,
        search_term: session.search_term().to_owned(),
        difficulty: session.difficulty(),
        all_collapsed: session.sections().all_collapsed(),
        steps,
    }
}
