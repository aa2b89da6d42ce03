//! Search and construction options
//!
//! Option misuse never fails: an unknown order falls back to ascending and a
//! non-positive limit means "no limit".

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alignment::Scoring;

/// Sort direction on score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

impl Order {
    /// Parse an order name. Anything other than "descending"/"desc" is ascending.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "descending" | "desc" => Order::Descending,
            _ => Order::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Order::Ascending => "ascending",
            Order::Descending => "descending",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Order {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Order {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Order::parse(&value))
    }
}

/// Per-query options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSearchOptions")]
pub struct SearchOptions {
    pub order: Order,
    /// Maximum number of results; `None` is unbounded
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn descending(self) -> Self {
        self.order(Order::Descending)
    }

    /// Set the result limit. Zero or negative removes the limit.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = usize::try_from(limit).ok().filter(|&n| n > 0);
        self
    }
}

#[derive(Deserialize)]
struct RawSearchOptions {
    #[serde(default)]
    order: Option<Order>,
    #[serde(default)]
    limit: Option<i64>,
}

impl From<RawSearchOptions> for SearchOptions {
    fn from(raw: RawSearchOptions) -> Self {
        let options = SearchOptions {
            order: raw.order.unwrap_or_default(),
            limit: None,
        };
        match raw.limit {
            Some(limit) => options.with_limit(limit),
            None => options,
        }
    }
}

/// Options fixed when a searcher is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearcherOptions {
    /// Literal substrings stripped from corpus entries and queries
    pub ignore: Vec<String>,
    pub scoring: Scoring,
    /// Shortlists at least this large are aligned in parallel (`parallel` feature)
    pub parallel_threshold: usize,
}

impl Default for SearcherOptions {
    fn default() -> Self {
        Self {
            ignore: Vec::new(),
            scoring: Scoring::default(),
            parallel_threshold: 1000,
        }
    }
}

impl SearcherOptions {
    pub fn ignore<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore = patterns.into_iter().map(Into::into).collect();
        self
    }
}
