//! The filter engine.
//!
//! The visible subset of the issue list is the conjunction of two named
//! predicates: a case-insensitive text match over the listed columns and a
//! pull-request inclusion policy. Predicates are plain values so they can be
//! composed with [`AllOf`] and tested without any terminal.

use crate::api::Issue;

/// A pure predicate over an issue.
pub trait IssuePredicate {
    /// Whether `issue` passes this predicate.
    fn matches(&self, issue: &Issue) -> bool;
}

impl<F> IssuePredicate for F
where
    F: Fn(&Issue) -> bool,
{
    fn matches(&self, issue: &Issue) -> bool {
        self(issue)
    }
}

/// Case-insensitive substring match over number, title, author and assignee.
///
/// An empty query matches every issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextMatch {
    needle: String,
}

impl TextMatch {
    /// Create a text match for `query`.
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// The lowercased query.
    pub fn needle(&self) -> &str {
        &self.needle
    }
}

impl IssuePredicate for TextMatch {
    fn matches(&self, issue: &Issue) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        let contains = |text: &str| text.to_lowercase().contains(&self.needle);

        contains(&issue.number.to_string())
            || contains(&issue.title)
            || contains(issue.author())
            || issue.assignee().is_some_and(contains)
    }
}

/// Whether pull requests are part of the visible subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestPolicy {
    include: bool,
}

impl PullRequestPolicy {
    /// Create a policy; `include = true` keeps everything.
    pub fn new(include: bool) -> Self {
        Self { include }
    }
}

impl IssuePredicate for PullRequestPolicy {
    fn matches(&self, issue: &Issue) -> bool {
        self.include || !issue.is_pull_request()
    }
}

/// Conjunction of any number of predicates.
///
/// An empty `AllOf` matches every issue.
#[derive(Default)]
pub struct AllOf {
    predicates: Vec<Box<dyn IssuePredicate>>,
}

impl AllOf {
    /// Create an empty conjunction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate.
    pub fn with(mut self, predicate: impl IssuePredicate + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    /// Number of combined predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether no predicate has been added.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl IssuePredicate for AllOf {
    fn matches(&self, issue: &Issue) -> bool {
        self.predicates.iter().all(|p| p.matches(issue))
    }
}

/// Builds the composite filter from the current inputs and applies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEngine {
    text: TextMatch,
    pull_requests: PullRequestPolicy,
}

impl FilterEngine {
    /// Create an engine for the given query and pull-request toggle.
    pub fn new(query: &str, include_pull_requests: bool) -> Self {
        Self {
            text: TextMatch::new(query),
            pull_requests: PullRequestPolicy::new(include_pull_requests),
        }
    }

    /// The composite "match all" predicate.
    pub fn predicate(&self) -> AllOf {
        AllOf::new()
            .with(self.text.clone())
            .with(self.pull_requests)
    }

    /// The text predicate, used for match highlighting.
    pub fn text(&self) -> &TextMatch {
        &self.text
    }

    /// Positions of the issues that pass the filter, in collection order.
    pub fn visible_indices(&self, issues: &[Issue]) -> Vec<usize> {
        let predicate = self.predicate();
        issues
            .iter()
            .enumerate()
            .filter(|(_, issue)| predicate.matches(issue))
            .map(|(i, _)| i)
            .collect()
    }
}
