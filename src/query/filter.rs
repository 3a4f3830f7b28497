//! Filter and sort primitives
//!
//! A `Filter` renders as `<camelField>:<operator>:<value>`, a `Sort` as
//! `<camelField>:<asc|desc>`. Both are joined with `,` into a single query
//! parameter by `RequestOptions`.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Operator
// ============================================================================

/// Filter operators understood by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Equals,
    In,
    CaseInsensitiveEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Tag membership. No user or group set field accepts it, so it only
    /// reaches the wire through [`RequestOptions::with_filter`](super::RequestOptions::with_filter)
    /// on collections filtered by `tags`.
    Has,
}

impl Operator {
    /// All operators, in wire-name order
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::In,
        Operator::CaseInsensitiveEquals,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Has,
    ];

    /// Wire name, also the keyword suffix after `__`
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "eq",
            Operator::In => "in",
            Operator::CaseInsensitiveEquals => "cieq",
            Operator::GreaterThan => "gt",
            Operator::GreaterThanOrEqual => "gte",
            Operator::LessThan => "lt",
            Operator::LessThanOrEqual => "lte",
            Operator::Has => "has",
        }
    }

    /// Look up an operator by wire name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    /// Whether the value is a bracketed list
    pub const fn takes_list(self) -> bool {
        matches!(self, Operator::In)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Filter Value
// ============================================================================

/// Right-hand side of a filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Convert a comma-separated string into a list value
    pub fn list_from_csv(s: &str) -> Self {
        FilterValue::List(
            s.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => f.write_str(s),
            FilterValue::List(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Text(b.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Text(n.to_string())
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        FilterValue::List(items)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(items: Vec<&str>) -> Self {
        FilterValue::List(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FilterValue {
    fn from(items: [&str; N]) -> Self {
        FilterValue::List(items.into_iter().map(String::from).collect())
    }
}

impl From<chrono::DateTime<chrono::Utc>> for FilterValue {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        FilterValue::Text(dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}

// ============================================================================
// Filter
// ============================================================================

/// A single `field:operator:value` predicate
///
/// `field` is always the server's camelCase name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub operator: Operator,
    pub value: FilterValue,
}

impl Filter {
    /// Create a filter, normalizing the field name to camelCase
    ///
    /// `in` values given as plain text are split on commas. A list is only
    /// accepted by `in`, and must not be empty.
    pub fn new(field: &str, operator: Operator, value: impl Into<FilterValue>) -> Result<Self> {
        let value = match (operator.takes_list(), value.into()) {
            (true, FilterValue::Text(s)) => FilterValue::list_from_csv(&s),
            (false, FilterValue::List(_)) => {
                return Err(Error::InvalidArgument {
                    message: format!("'{field}' with operator '{operator}' takes a single value"),
                })
            }
            (_, v) => v,
        };
        if matches!(&value, FilterValue::List(items) if items.is_empty()) {
            return Err(Error::InvalidArgument {
                message: format!("'{field}' with operator '{operator}' needs at least one value"),
            });
        }
        Ok(Self {
            field: to_camel_case(field),
            operator,
            value,
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field, self.operator, self.value)
    }
}

// ============================================================================
// Sort
// ============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// A single `field:direction` sort clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: Direction,
}

impl Sort {
    pub fn new(field: &str, direction: Direction) -> Self {
        Self {
            field: to_camel_case(field),
            direction,
        }
    }

    /// Parse `name` / `-name` into an ascending / descending sort
    pub fn parse(spec: &str) -> Self {
        match spec.strip_prefix('-') {
            Some(field) => Self::new(field, Direction::Desc),
            None => Self::new(spec, Direction::Asc),
        }
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.direction.as_str())
    }
}

// ============================================================================
// Keyword arguments
// ============================================================================

/// A raw filter argument, e.g. from the command line
///
/// `last_login__gte=2024-01-01` is a keyword; anything without `=` is
/// positional and rejected by `QuerySet::filter_args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterArg {
    Keyword { key: String, value: String },
    Positional(String),
}

impl FilterArg {
    pub fn keyword(key: impl Into<String>, value: impl Into<String>) -> Self {
        FilterArg::Keyword {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl FromStr for FilterArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                FilterArg::keyword(key.trim(), value.trim())
            }
            _ => FilterArg::Positional(s.to_string()),
        })
    }
}

/// Split `field__op` into its field and operator parts
///
/// A key without a suffix uses `eq`.
pub fn split_keyword(key: &str) -> Result<(&str, Operator)> {
    match key.rsplit_once("__") {
        None => Ok((key, Operator::Equals)),
        Some((field, op)) => {
            let operator = Operator::parse(op).ok_or_else(|| Error::InvalidOperator {
                field: field.to_string(),
                operator: op.to_string(),
            })?;
            Ok((field, operator))
        }
    }
}

// ============================================================================
// Naming
// ============================================================================

/// `last_login` → `lastLogin`; camelCase input passes through unchanged
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// `lastLogin` → `last_login`; snake_case input passes through unchanged
pub fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
