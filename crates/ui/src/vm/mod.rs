mod problem_vm;
mod tracker_vm;

pub use problem_vm::{DifficultyTone, LinkKind, LinkVm, ProblemVm};
pub use tracker_vm::{AuthVm, StatsVm, StepVm, TrackerVm, build_tracker_vm};
