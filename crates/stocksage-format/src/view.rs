use std::collections::BTreeSet;

/// Per-section expanded/collapsed display state for one reply.
///
/// Sections are addressed by their heading ordinal (see
/// [`Section::index`](crate::Section::index)) and start out expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionView {
    collapsed: BTreeSet<usize>,
}

impl SectionView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, section: usize) -> bool {
        !self.collapsed.contains(&section)
    }

    pub fn collapse(&mut self, section: usize) {
        self.collapsed.insert(section);
    }

    pub fn expand(&mut self, section: usize) {
        self.collapsed.remove(&section);
    }

    /// Flip one section and return its new expanded state.
    pub fn toggle(&mut self, section: usize) -> bool {
        if self.collapsed.remove(&section) {
            true
        } else {
            self.collapsed.insert(section);
            false
        }
    }
}
