//! Filtered View
//!
//! Pure projection of the cached list by search text and completion status.

use std::fmt;
use std::str::FromStr;

use crate::schema::CachedTodo;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Incomplete,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 3] = [StatusFilter::All, StatusFilter::Completed, StatusFilter::Incomplete];

    /// Value used by the `<select>` options
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Completed => "completed",
            StatusFilter::Incomplete => "incomplete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::Incomplete => "Incomplete",
        }
    }

    pub fn matches(&self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => completed,
            StatusFilter::Incomplete => !completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "incomplete" => Ok(StatusFilter::Incomplete),
            other => Err(format!("unknown status filter: {}", other)),
        }
    }
}

/// Search term plus status selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub search: String,
    pub status: StatusFilter,
}

impl TodoFilter {
    pub fn new(search: &str, status: StatusFilter) -> Self {
        Self {
            search: search.to_string(),
            status,
        }
    }

    /// Trimmed, lowercased term; `None` when blank
    fn needle(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    pub fn is_active(&self) -> bool {
        !self.search.is_empty() || self.status != StatusFilter::All
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, entry: &CachedTodo) -> bool {
        let text_ok = match self.needle() {
            Some(needle) => entry.todo.todo.to_lowercase().contains(&needle),
            None => true,
        };
        text_ok && self.status.matches(entry.todo.completed)
    }

    /// Subsequence of `todos` matching both predicates, order preserved.
    pub fn apply(&self, todos: &[CachedTodo]) -> Vec<CachedTodo> {
        todos.iter().filter(|entry| self.matches(entry)).cloned().collect()
    }
}

/// Counts shown next to the filter controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterSummary {
    pub total: usize,
    pub completed: usize,
    pub incomplete: usize,
}

impl FilterSummary {
    pub fn of(todos: &[CachedTodo]) -> Self {
        let completed = todos.iter().filter(|e| e.todo.completed).count();
        Self {
            total: todos.len(),
            completed,
            incomplete: todos.len() - completed,
        }
    }
}
