use regex::Regex;

/// Word characters only: what the ETL storage backend accepts as a column name
pub const DEFAULT_COLUMN_NAME_PATTERN: &str = "^[A-Za-z0-9_]+$";

/// Column name constraint of the target storage backend
#[derive(Debug, Clone)]
pub struct ColumnNameRule {
    pattern: Regex,
}

impl ColumnNameRule {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn is_valid(&self, name: &str) -> bool {
        self.pattern.is_match(name)
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Names that fail the rule, in input order
    pub fn offending<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        names
            .into_iter()
            .filter(|name| !self.is_valid(name))
            .cloned()
            .collect()
    }
}
