use std::collections::BTreeMap;

/// Collapsed/expanded state per step index. Untouched steps are expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionVisibility {
    collapsed: BTreeMap<usize, bool>,
    all_collapsed: bool,
}

impl SectionVisibility {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_collapsed(&self, index: usize) -> bool {
        self.collapsed.get(&index).copied().unwrap_or(false)
    }

    pub fn toggle_one(&mut self, index: usize) {
        let flag = self.collapsed.entry(index).or_insert(false);
        *flag = !*flag;
    }

    /// Sets every index in `0..step_count` to `target` and remembers it.
    pub fn set_all(&mut self, target: bool, step_count: usize) {
        self.all_collapsed = target;
        self.collapsed = (0..step_count).map(|index| (index, target)).collect();
    }

    /// Flips the remembered global target and applies it uniformly, without
    /// looking at individual states. Returns the new target.
    pub fn toggle_all(&mut self, step_count: usize) -> bool {
        let target = !self.all_collapsed;
        self.set_all(target, step_count);
        target
    }

    /// The target of the last global toggle.
    #[must_use]
    pub fn all_collapsed(&self) -> bool {
        self.all_collapsed
    }

    #[must_use]
    pub fn snapshot(&self) -> &BTreeMap<usize, bool> {
        &self.collapsed
    }
}
