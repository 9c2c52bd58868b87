//! Ordered, branchable record of visited pages.

use crate::page::Page;

/// Visited pages in visitation order plus a cursor at the current page.
///
/// Never empty; the cursor is always a valid index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationHistory {
    entries: Vec<Page>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new(initial: Page) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> Page {
        self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[Page] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Discard forward entries, append `page` and move the cursor onto it.
    pub fn push(&mut self, page: Page) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(page);
        self.cursor = self.entries.len() - 1;
    }

    /// Append `page` after every existing entry, keeping forward entries.
    pub fn append(&mut self, page: Page) {
        self.entries.push(page);
        self.cursor = self.entries.len() - 1;
    }

    pub fn step_back(&mut self) -> Option<Page> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn step_forward(&mut self) -> Option<Page> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    /// Index of the first occurrence of `page`.
    pub fn position(&self, page: Page) -> Option<usize> {
        self.entries.iter().position(|p| *p == page)
    }

    /// Move the cursor to `index`. Out-of-range indices are ignored.
    pub fn seek(&mut self, index: usize) -> Option<Page> {
        if index >= self.entries.len() {
            return None;
        }
        self.cursor = index;
        Some(self.current())
    }
}
