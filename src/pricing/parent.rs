//! Parent issue detection.
//!
//! A parent issue tracks its sub-issues as a task list in the body
//! (`- [ ] #12`, `- [x] #13`) and is never priced itself.

use std::sync::LazyLock;

use regex::Regex;

/// A task-list item referencing an issue number.
///
/// Single literal spaces and a lowercase `x` only: `- [X] #1` and
/// `-  [ ] #1` are not task references.
static SUB_ISSUE_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \[( |x)\] #\d+").expect("sub-issue pattern is valid"));

/// Whether the issue body references sub-issues through a task list.
pub fn is_parent_issue(body: &str) -> bool {
    SUB_ISSUE_ITEM.is_match(body)
}
