use tracker_core::model::{CompletionMap, Problem, ProblemKey};

/// Badge tone for a difficulty label. Matched ignoring case, unlike the filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DifficultyTone {
    Easy,
    Medium,
    Hard,
    Neutral,
}

impl DifficultyTone {
    #[must_use]
    pub fn of(difficulty: &str) -> Self {
        match difficulty.to_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "hard" => Self::Hard,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Easy => "badge badge--easy",
            Self::Medium => "badge badge--medium",
            Self::Hard => "badge badge--hard",
            Self::Neutral => "badge",
        }
    }
}

/// External links a problem may carry, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Url,
    Practice,
    Solve,
    Revision,
    Note,
}

impl LinkKind {
    pub const ORDER: [LinkKind; 5] = [
        LinkKind::Url,
        LinkKind::Practice,
        LinkKind::Solve,
        LinkKind::Revision,
        LinkKind::Note,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            LinkKind::Url => "URL",
            LinkKind::Practice => "Practice",
            LinkKind::Solve => "Solve",
            LinkKind::Revision => "Leetcode",
            LinkKind::Note => "Note",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            LinkKind::Url => "🔗",
            LinkKind::Practice => "📝",
            LinkKind::Solve => "💡",
            LinkKind::Revision => "👩🏻‍💻",
            LinkKind::Note => "🗒️",
        }
    }

    fn href(self, problem: &Problem) -> Option<&str> {
        match self {
            LinkKind::Url => problem.url.as_deref(),
            LinkKind::Practice => problem.practice.as_deref(),
            LinkKind::Solve => problem.solve.as_deref(),
            LinkKind::Revision => problem.revision.as_deref(),
            LinkKind::Note => problem.note.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkVm {
    pub kind: LinkKind,
    pub href: String,
}

/// One visible problem row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProblemVm {
    pub key: ProblemKey,
    pub title: String,
    pub completed: bool,
    pub difficulty: Option<(String, DifficultyTone)>,
    pub resource: Option<String>,
    pub links: Vec<LinkVm>,
}

impl ProblemVm {
    #[must_use]
    pub fn new(key: ProblemKey, problem: &Problem, completion: &CompletionMap) -> Self {
        let difficulty = problem
            .difficulty
            .as_deref()
            .filter(|label| !label.is_empty())
            .map(|label| (label.to_owned(), DifficultyTone::of(label)));
        let links = LinkKind::ORDER
            .into_iter()
            .filter_map(|kind| {
                kind.href(problem)
                    .filter(|href| !href.is_empty())
                    .map(|href| LinkVm {
                        kind,
                        href: href.to_owned(),
                    })
            })
            .collect();

        Self {
            key,
            title: problem.title.clone(),
            completed: completion.is_completed(key),
            difficulty,
            resource: problem.resource.clone().filter(|value| !value.is_empty()),
            links,
        }
    }

    /// Row class; completed rows are struck through.
    #[must_use]
    pub fn row_class(&self) -> &'static str {
        if self.completed {
            "problem problem--done"
        } else {
            "problem"
        }
    }
}
