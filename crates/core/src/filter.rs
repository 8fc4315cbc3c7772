//! Visible-subset rules for the problem list.
//!
//! A problem is shown when its title contains the search term (ignoring case)
//! and its difficulty matches the selected filter exactly. Steps left with no
//! visible problems are dropped entirely.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::{Curriculum, Problem, Step};

/// Difficulty levels offered by the filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The exact string stored on problems for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty filter: {0}")]
pub struct ParseDifficultyError(String);

/// Selection of the difficulty control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// Every option in display order, starting with `All`.
    pub const OPTIONS: [DifficultyFilter; 4] = [
        DifficultyFilter::All,
        DifficultyFilter::Only(Difficulty::Easy),
        DifficultyFilter::Only(Difficulty::Medium),
        DifficultyFilter::Only(Difficulty::Hard),
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DifficultyFilter::All => "All",
            DifficultyFilter::Only(level) => level.as_str(),
        }
    }

    /// Case-sensitive comparison against the stored difficulty string.
    #[must_use]
    pub fn accepts(self, difficulty: Option<&str>) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(level) => difficulty == Some(level.as_str()),
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyFilter {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::OPTIONS
            .into_iter()
            .find(|option| option.label() == s)
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}

/// A problem that survived filtering, with its position in the original step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleProblem<'a> {
    pub index: usize,
    pub problem: &'a Problem,
}

/// A step with at least one visible problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleStep<'a> {
    pub index: usize,
    pub step: &'a Step,
    pub problems: Vec<VisibleProblem<'a>>,
}

/// Search term plus difficulty selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    needle: String,
    difficulty: DifficultyFilter,
}

impl ViewFilter {
    #[must_use]
    pub fn new(term: &str, difficulty: DifficultyFilter) -> Self {
        Self {
            needle: term.to_lowercase(),
            difficulty,
        }
    }

    #[must_use]
    pub fn matches(&self, problem: &Problem) -> bool {
        let title_matches =
            self.needle.is_empty() || problem.title.to_lowercase().contains(&self.needle);
        title_matches && self.difficulty.accepts(problem.difficulty.as_deref())
    }

    /// Stable filter: keeps original relative order and original indices.
    #[must_use]
    pub fn apply<'a>(&self, problems: &'a [Problem]) -> Vec<VisibleProblem<'a>> {
        problems
            .iter()
            .enumerate()
            .filter(|(_, problem)| self.matches(problem))
            .map(|(index, problem)| VisibleProblem { index, problem })
            .collect()
    }

    #[must_use]
    pub fn visible_steps<'a>(&self, curriculum: &'a Curriculum) -> Vec<VisibleStep<'a>> {
        curriculum
            .steps()
            .iter()
            .enumerate()
            .filter_map(|(index, step)| {
                let problems = self.apply(&step.problems);
                (!problems.is_empty()).then_some(VisibleStep {
                    index,
                    step,
                    problems,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Problem> {
        vec![
            Problem::titled("Two Sum").with_difficulty("Easy"),
            Problem::titled("LRU Cache").with_difficulty("Hard"),
        ]
    }

    #[test]
    fn search_is_case_insensitive() {
        let problems = sample();
        let visible = ViewFilter::new("sum", DifficultyFilter::All).apply(&problems);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].problem.title, "Two Sum");
        assert_eq!(visible[0].index, 0);
    }

    #[test]
    fn empty_term_matches_everything() {
        let problems = sample();
        let visible = ViewFilter::new("", DifficultyFilter::All).apply(&problems);
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn difficulty_match_is_exact() {
        let problems = vec![
            Problem::titled("a").with_difficulty("hard"),
            Problem::titled("b").with_difficulty("Hard"),
            Problem::titled("c"),
        ];
        let visible =
            ViewFilter::new("", DifficultyFilter::Only(Difficulty::Hard)).apply(&problems);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].problem.title, "b");
        assert_eq!(visible[0].index, 1);
    }

    #[test]
    fn keeps_original_indices_and_order() {
        let problems = vec![
            Problem::titled("Merge Intervals"),
            Problem::titled("Binary Search"),
            Problem::titled("Merge Sort"),
        ];
        let visible = ViewFilter::new("MERGE", DifficultyFilter::All).apply(&problems);
        let indices: Vec<usize> = visible.iter().map(|v| v.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let problems = vec![
            Problem::titled("Two Sum").with_difficulty("Easy"),
            Problem::titled("Three Sum").with_difficulty("Medium"),
            Problem::titled("Four Sum").with_difficulty("Medium"),
            Problem::titled("Trapping Rain Water").with_difficulty("Hard"),
        ];
        let filter = ViewFilter::new("sum", DifficultyFilter::Only(Difficulty::Medium));
        let once: Vec<Problem> = filter
            .apply(&problems)
            .into_iter()
            .map(|v| v.problem.clone())
            .collect();
        let twice: Vec<Problem> = filter
            .apply(&once)
            .into_iter()
            .map(|v| v.problem.clone())
            .collect();
        assert_eq!(once, twice);
        assert_eq!(once.len(), 2);
    }

    #[test]
    fn steps_without_matches_are_omitted() {
        let curriculum = Curriculum::new(vec![
            Step::new("Arrays", vec![Problem::titled("Two Sum")]),
            Step::new("Graphs", vec![Problem::titled("Dijkstra")]),
            Step::new("More Arrays", vec![Problem::titled("Three Sum")]),
        ]);
        let steps = ViewFilter::new("sum", DifficultyFilter::All).visible_steps(&curriculum);
        let indices: Vec<usize> = steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn filter_parses_select_values() {
        assert_eq!("All".parse::<DifficultyFilter>().unwrap(), DifficultyFilter::All);
        assert_eq!(
            "Medium".parse::<DifficultyFilter>().unwrap(),
            DifficultyFilter::Only(Difficulty::Medium)
        );
        assert!("medium".parse::<DifficultyFilter>().is_err());
    }
}
