//! Column name validation
//!
//! Every column key of the merged view is checked against a [`NameRule`]. One
//! [`Hint`] is produced per offending column, in column order; any hint blocks
//! submission.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::types::ColumnMap;

/// Decides whether a column name is acceptable to the target storage backend
pub trait NameRule: Send + Sync {
    fn is_valid(&self, name: &str) -> bool;
}

/// One or more ASCII letters, digits or underscores, nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordCharsRule;

impl NameRule for WordCharsRule {
    fn is_valid(&self, name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
    }
}

/// Rule backed by a regular expression, for backends with other naming constraints
#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
}

impl PatternRule {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

impl NameRule for PatternRule {
    fn is_valid(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }
}

/// Shared handle to the active rule
pub type SharedNameRule = Arc<dyn NameRule>;

pub fn default_rule() -> SharedNameRule {
    Arc::new(WordCharsRule)
}

/// Rule for a backend-provided pattern, falling back to [`WordCharsRule`] when
/// the pattern does not compile.
pub fn rule_from_pattern(pattern: Option<&str>) -> SharedNameRule {
    match pattern.map(PatternRule::new) {
        Some(Ok(rule)) => Arc::new(rule),
        Some(Err(e)) => {
            log::warn!("Ignoring invalid column name pattern: {}", e);
            default_rule()
        }
        None => default_rule(),
    }
}

/// Validation warning for a column whose name the backend would reject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub column: String,
}

impl Hint {
    /// Emphasized part of the message
    pub const ALIAS_EXAMPLE: &'static str = "AS my_alias";
    pub const TAIL: &'static str = ") using only alphanumeric characters and underscores";

    /// Message text up to [`Hint::ALIAS_EXAMPLE`]
    pub fn lead(&self) -> String {
        format!(
            "{} is not right as a column name, please alias it (as in SELECT count(*) ",
            self.column
        )
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lead(), Self::ALIAS_EXAMPLE, Self::TAIL)
    }
}

pub fn validate(columns: &ColumnMap, rule: &dyn NameRule) -> Vec<Hint> {
    columns
        .keys()
        .filter(|name| !rule.is_valid(name))
        .map(|name| Hint {
            column: name.clone(),
        })
        .collect()
}
