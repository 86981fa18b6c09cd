//! Read-only curriculum snapshot with substring search.

use itmo_advisor_shared::{CurriculumStore, Program};

/// Maximum number of lines returned by [`CurriculumIndex::search`].
pub const MAX_MATCHES: usize = 10;

/// Immutable view of the extracted curricula, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct CurriculumIndex {
    store: CurriculumStore,
}

impl CurriculumIndex {
    pub fn new(store: CurriculumStore) -> Self {
        Self { store }
    }

    /// Total number of course lines across all programs.
    pub fn len(&self) -> usize {
        self.store
            .values()
            .flatten()
            .map(|doc| doc.courses.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lines under `program` containing `query`, ignoring case.
    ///
    /// Results keep stored order (document, then line) and are capped at
    /// [`MAX_MATCHES`].
    pub fn search(&self, program: Program, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();

        self.store
            .get(&program)
            .into_iter()
            .flatten()
            .flat_map(|doc| doc.courses.iter())
            .filter(|course| course.raw.to_lowercase().contains(&needle))
            .take(MAX_MATCHES)
            .map(|course| course.raw.clone())
            .collect()
    }
}
