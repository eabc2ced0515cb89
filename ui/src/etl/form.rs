//! Editable draft of a new ETL data source and its derived hints.

use crate::etl::merge::merge_columns;
use crate::etl::validator::{validate, Hint, SharedNameRule};
use crate::types::{ColumnEdit, ColumnFlag, ColumnMap, ColumnType, EtlRequest, Query};

pub const DEFAULT_CHUNK_SIZE: &str = "1000";

/// The in-progress definition of a data source
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub name: String,
    /// Raw text as typed by the user
    pub chunk_size: String,
    pub columns: ColumnMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Pending,
}

/// Default name for a data source built from `query`: `{db}-{user}-{unique_id}`
pub fn default_name(query: &Query, unique_id: &str) -> String {
    let mut name = String::new();
    if let Some(db) = query.db.as_deref().filter(|s| !s.is_empty()) {
        name.push_str(db);
        name.push('-');
    }
    if let Some(user) = query.user.as_deref().filter(|s| !s.is_empty()) {
        name.push_str(user);
        name.push('-');
    }
    name.push_str(unique_id);
    name
}

/// Short random identifier used to keep default names unique
pub fn short_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(10);
    id
}

/// Form state holder for the ETL dialog.
///
/// Every mutation touches a single draft field and re-runs validation before
/// returning, so `hints()` always reflects the current draft.
#[derive(Clone)]
pub struct EtlForm {
    query: Query,
    draft: Draft,
    hints: Vec<Hint>,
    rule: SharedNameRule,
    status: SubmitStatus,
}

impl EtlForm {
    pub fn new(query: Query, rule: SharedNameRule) -> Self {
        let unique_id = short_id();
        Self::with_unique_id(query, rule, &unique_id)
    }

    pub fn with_unique_id(query: Query, rule: SharedNameRule, unique_id: &str) -> Self {
        let draft = Draft {
            name: default_name(&query, unique_id),
            chunk_size: DEFAULT_CHUNK_SIZE.to_string(),
            columns: merge_columns(query.result_columns(), &ColumnMap::new()),
        };
        let mut form = Self {
            query,
            draft,
            hints: Vec::new(),
            rule,
            status: SubmitStatus::Idle,
        };
        form.validate();
        form
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    pub fn has_results(&self) -> bool {
        self.query.result_columns().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.status == SubmitStatus::Pending
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.hints.is_empty() && !self.is_pending()
    }

    pub fn merged_columns(&self) -> ColumnMap {
        merge_columns(self.query.result_columns(), &self.draft.columns)
    }

    /// Merged edit for `column`, used for rendering its row
    pub fn column(&self, column: &str) -> Option<ColumnEdit> {
        self.draft.columns.get(column).cloned().or_else(|| {
            self.query
                .result_columns()?
                .iter()
                .find(|c| c.name == column)
                .map(ColumnEdit::from_column)
        })
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
        self.validate();
    }

    pub fn set_chunk_size(&mut self, value: impl Into<String>) {
        self.draft.chunk_size = value.into();
        self.validate();
    }

    pub fn set_column_flag(&mut self, column: &str, flag: ColumnFlag, value: bool) {
        self.update_column(column, |edit| match flag {
            ColumnFlag::Index => edit.is_index = Some(value),
            ColumnFlag::Dimension => edit.is_dim = Some(value),
        });
    }

    pub fn set_column_type(&mut self, column: &str, column_type: Option<ColumnType>) {
        self.update_column(column, |edit| edit.column_type = column_type);
    }

    /// An empty display name clears the customization.
    pub fn set_column_display_name(&mut self, column: &str, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        self.update_column(column, |edit| edit.verbose_name = value);
    }

    /// Package the draft for the create action
    pub fn build_request(&self) -> EtlRequest {
        EtlRequest {
            name: self.draft.name.clone(),
            chunk_size: self.draft.chunk_size.clone(),
            columns: self.draft.columns.clone(),
            sql: self.query.sql.clone(),
            db_id: self.query.db_id,
        }
    }

    /// Enter the pending state and return the request to send
    pub fn begin_submit(&mut self) -> EtlRequest {
        self.status = SubmitStatus::Pending;
        self.build_request()
    }

    pub fn finish_submit(&mut self) {
        self.status = SubmitStatus::Idle;
    }

    fn update_column(&mut self, column: &str, apply: impl FnOnce(&mut ColumnEdit)) {
        let mut merged = self.merged_columns();
        match merged.get(column).cloned() {
            Some(mut edit) => {
                apply(&mut edit);
                merged.insert(column.to_string(), edit);
                self.draft.columns = merged;
            }
            None => log::warn!("Ignoring edit for unknown column '{}'", column),
        }
        self.validate();
    }

    fn validate(&mut self) {
        self.hints = if self.has_results() {
            validate(&self.merged_columns(), self.rule.as_ref())
        } else {
            Vec::new()
        };
    }
}
