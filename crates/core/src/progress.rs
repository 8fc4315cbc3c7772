//! Aggregate and per-step completion statistics.

use crate::model::{CompletionMap, Curriculum, ProblemKey, Step};

/// Problems per level.
pub const PROBLEMS_PER_LEVEL: usize = 10;

/// Whole-curriculum statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage; may exceed 100 when stale keys are counted.
    pub rate: u32,
}

impl ProgressStats {
    /// One level per ten completed problems, starting at 1.
    #[must_use]
    pub fn level(&self) -> usize {
        self.completed / PROBLEMS_PER_LEVEL + 1
    }
}

/// Statistics for a single step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepStats {
    pub completed: usize,
    pub total: usize,
    pub percentage: f64,
}

impl StepStats {
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rounded_percentage(&self) -> u32 {
        self.percentage.round() as u32
    }
}

#[allow(clippy::cast_precision_loss)]
fn percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    completed as f64 / total as f64 * 100.0
}

/// `completed` counts every `true` entry in the map, even keys that do not
/// belong to `curriculum`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stats(map: &CompletionMap, curriculum: &Curriculum) -> ProgressStats {
    let total = curriculum.total_problems();
    let completed = map.completed_count();
    let rate = percentage(completed, total).round() as u32;
    ProgressStats {
        total,
        completed,
        rate,
    }
}

/// Counts only positions of `step`, looked up as `key(step_index, position)`.
#[must_use]
pub fn step_stats(map: &CompletionMap, step: &Step, step_index: usize) -> StepStats {
    let total = step.problems.len();
    let completed = (0..total)
        .filter(|position| map.is_completed(ProblemKey::new(step_index, *position)))
        .count();
    StepStats {
        completed,
        total,
        percentage: percentage(completed, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Problem;

    fn curriculum(sizes: &[usize]) -> Curriculum {
        Curriculum::new(
            sizes
                .iter()
                .enumerate()
                .map(|(s, size)| {
                    Step::new(
                        format!("Step {s}"),
                        (0..*size).map(|p| Problem::titled(format!("P{s}.{p}"))).collect(),
                    )
                })
                .collect(),
        )
    }

    fn completed(keys: &[(usize, usize)]) -> CompletionMap {
        keys.iter()
            .map(|(s, p)| (ProblemKey::new(*s, *p), true))
            .collect()
    }

    #[test]
    fn total_is_sum_of_step_sizes() {
        let c = curriculum(&[3, 0, 5, 1]);
        assert_eq!(stats(&CompletionMap::new(), &c).total, 9);
    }

    #[test]
    fn rate_is_zero_for_empty_curriculum() {
        let s = stats(&completed(&[(0, 0)]), &Curriculum::default());
        assert_eq!(s.total, 0);
        assert_eq!(s.completed, 1);
        assert_eq!(s.rate, 0);
    }

    #[test]
    fn rate_rounds_to_nearest() {
        let c = curriculum(&[3]);
        assert_eq!(stats(&completed(&[(0, 0)]), &c).rate, 33);
        assert_eq!(stats(&completed(&[(0, 0), (0, 1)]), &c).rate, 67);
        let c = curriculum(&[8]);
        // 1/8 = 12.5%
        assert_eq!(stats(&completed(&[(0, 0)]), &c).rate, 13);
    }

    #[test]
    fn stale_keys_still_count() {
        let c = curriculum(&[2]);
        let mut map = completed(&[(0, 0), (7, 3)]);
        map.set(ProblemKey::new(0, 1), false);
        let s = stats(&map, &c);
        assert_eq!(s.completed, 2);
        assert_eq!(s.rate, 100);
    }

    #[test]
    fn level_steps_every_ten() {
        let c = curriculum(&[30]);
        let keys: Vec<(usize, usize)> = (0..9).map(|p| (0, p)).collect();
        assert_eq!(stats(&completed(&keys), &c).level(), 1);
        let keys: Vec<(usize, usize)> = (0..10).map(|p| (0, p)).collect();
        assert_eq!(stats(&completed(&keys), &c).level(), 2);
        let keys: Vec<(usize, usize)> = (0..25).map(|p| (0, p)).collect();
        assert_eq!(stats(&completed(&keys), &c).level(), 3);
    }

    #[test]
    fn step_stats_only_count_own_positions() {
        let c = curriculum(&[2, 4]);
        let map = completed(&[(0, 0), (1, 1), (1, 3), (1, 9)]);
        let s = step_stats(&map, &c.steps()[1], 1);
        assert_eq!(s.completed, 2);
        assert_eq!(s.total, 4);
        assert!((s.percentage - 50.0).abs() < f64::EPSILON);
        assert_eq!(s.rounded_percentage(), 50);
    }

    #[test]
    fn step_stats_of_empty_step_are_zero() {
        let step = Step::new("Empty", Vec::new());
        let s = step_stats(&completed(&[(0, 0)]), &step, 0);
        assert_eq!(s.total, 0);
        assert_eq!(s.completed, 0);
        assert!(s.percentage.abs() < f64::EPSILON);
    }
}
