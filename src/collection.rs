//! The in-memory issue collection.
//!
//! Issues are appended page by page in fetch order. The collection is owned by
//! the dialog controller for the whole session and is never persisted.
//! Fixed marks outlive a reload: they are keyed by issue number and put back
//! on the refetched records as their pages arrive.

use std::collections::HashSet;

use crate::api::Issue;

/// Append-only ordered sequence of fetched issues.
#[derive(Debug, Clone, Default)]
pub struct IssueCollection {
    issues: Vec<Issue>,
    /// Marked numbers waiting for their issue to be fetched again.
    carried_marks: HashSet<u64>,
}

impl IssueCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fetched page, preserving fetch order.
    pub fn append_page(&mut self, page: Vec<Issue>) {
        let start = self.issues.len();
        self.issues.extend(page);
        if self.carried_marks.is_empty() {
            return;
        }
        for issue in &mut self.issues[start..] {
            if self.carried_marks.remove(&issue.number) {
                issue.checked = true;
            }
        }
    }

    /// Drop the issues ahead of a fresh download.
    ///
    /// Checked numbers are remembered and applied again when those issues
    /// come back in a later page.
    pub fn restart(&mut self) {
        self.carried_marks
            .extend(self.issues.iter().filter(|i| i.checked).map(|i| i.number));
        self.issues.clear();
    }

    /// All issues in fetch order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Get an issue by position.
    pub fn get(&self, index: usize) -> Option<&Issue> {
        self.issues.get(index)
    }

    /// Set the checked flag of the issue with `number`.
    ///
    /// Returns `false` if no such issue is in the collection.
    pub fn set_checked(&mut self, number: u64, checked: bool) -> bool {
        match self.issues.iter_mut().find(|i| i.number == number) {
            Some(issue) => {
                issue.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Flip the checked flag of the issue with `number`.
    ///
    /// Returns the new state, or `None` if the issue is unknown.
    pub fn toggle_checked(&mut self, number: u64) -> Option<bool> {
        let issue = self.issues.iter_mut().find(|i| i.number == number)?;
        issue.checked = !issue.checked;
        Some(issue.checked)
    }

    /// Issues the user marked as fixed, in fetch order.
    pub fn checked(&self) -> Vec<Issue> {
        self.issues.iter().filter(|i| i.checked).cloned().collect()
    }

    /// Number of checked issues.
    pub fn checked_count(&self) -> usize {
        self.issues.iter().filter(|i| i.checked).count()
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
