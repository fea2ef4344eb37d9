//! Pagination types
//!
//! Defines the parameter bag, the per-page result and the pager states.

use std::fmt;

/// Query parameter that carries the page cursor
pub const CURSOR_PARAM: &str = "page";

/// A single query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Free-form string
    String(String),
    /// Integer value
    Number(i64),
    /// Boolean flag, encoded as `true` / `false`
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Number(value as i64)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered query parameter bag
///
/// Keys keep the position of their first insertion. A key may be present
/// with an absent value (`None`); such keys are skipped when encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRequest {
    params: Vec<(String, Option<ParamValue>)>,
}

impl PageRequest {
    /// Create an empty parameter bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, Some(value.into()));
        self
    }

    /// Add or replace a parameter that may be absent
    #[must_use]
    pub fn with_opt<V: Into<ParamValue>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.set(key, value.map(Into::into));
        self
    }

    /// Set a parameter in place, overwriting any previous value
    pub fn set(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
        let key = key.into();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.params.push((key, value)),
        }
    }

    /// Remove a parameter entirely
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let idx = self.params.iter().position(|(k, _)| k == key)?;
        self.params.remove(idx).1
    }

    /// Get a present parameter value
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Current page cursor, if any
    pub fn cursor(&self) -> Option<u64> {
        match self.get(CURSOR_PARAM)? {
            ParamValue::Number(n) => u64::try_from(*n).ok(),
            ParamValue::String(s) => s.parse().ok(),
            ParamValue::Bool(_) => None,
        }
    }

    /// Overwrite the page cursor; `None` marks it absent
    pub fn set_cursor(&mut self, cursor: Option<u64>) {
        self.set(CURSOR_PARAM, cursor.map(ParamValue::from));
    }

    /// Iterate over present parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.params
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.as_str(), v)))
    }

    /// True when no parameter has a present value
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// Result of fetching a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    /// Items in server order
    pub items: Vec<T>,
    /// Page number of the next page; `None` on the last page
    pub next_cursor: Option<u64>,
}

impl<T> PageResult<T> {
    /// A page followed by more pages
    pub fn new(items: Vec<T>, next_cursor: Option<u64>) -> Self {
        Self { items, next_cursor }
    }

    /// The final page
    pub fn last(items: Vec<T>) -> Self {
        Self {
            items,
            next_cursor: None,
        }
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_cursor.is_none()
    }
}

/// Lifecycle of a pager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PagerState {
    /// No request in flight; the next poll may issue one
    #[default]
    Ready,
    /// A page request is in flight
    Fetching,
    /// The last page has been received
    Exhausted,
    /// A page request failed or the page limit was hit
    Failed,
}

impl PagerState {
    /// Check if no further request will ever be issued
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Exhausted | Self::Failed)
    }
}
