use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Positional identifier of a problem: `"{step}_{problem}"`, both zero-based.
///
/// Stored progress is only meaningful while the curriculum keeps its order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemKey {
    step: usize,
    problem: usize,
}

impl ProblemKey {
    #[must_use]
    pub const fn new(step: usize, problem: usize) -> Self {
        Self { step, problem }
    }

    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub const fn problem(&self) -> usize {
        self.problem
    }
}

impl fmt::Debug for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProblemKey({}_{})", self.step, self.problem)
    }
}

impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.step, self.problem)
    }
}

/// Error type for parsing a `ProblemKey` from its string form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKeyError {
    raw: String,
}

impl fmt::Display for ParseKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse problem key from {:?}", self.raw)
    }
}

impl std::error::Error for ParseKeyError {}

impl FromStr for ProblemKey {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseKeyError { raw: s.to_owned() };
        let (step, problem) = s.split_once('_').ok_or_else(err)?;
        let step = step.parse::<usize>().map_err(|_| err())?;
        let problem = problem.parse::<usize>().map_err(|_| err())?;
        let key = Self::new(step, problem);
        // Only the canonical spelling is a key; "01_2" and "+1_2" are not "1_2".
        if key.to_string() != s {
            return Err(err());
        }
        Ok(key)
    }
}

impl Serialize for ProblemKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ProblemKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
