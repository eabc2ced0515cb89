//! Reconciles query result columns with the draft's column edits.

use crate::types::{ColumnEdit, ColumnMap, ResultColumn};

/// Combine result columns and draft edits into the canonical column view.
///
/// Result columns come first, in result order, each carrying the draft's edit when
/// there is one and a default edit otherwise. Draft keys that are not result columns
/// follow, so an edit is never dropped. No result columns yields an empty map.
pub fn merge_columns(columns: Option<&[ResultColumn]>, edits: &ColumnMap) -> ColumnMap {
    let Some(columns) = columns.filter(|c| !c.is_empty()) else {
        return ColumnMap::new();
    };

    let mut merged = ColumnMap::with_capacity(columns.len().max(edits.len()));
    for column in columns {
        let edit = edits
            .get(&column.name)
            .cloned()
            .unwrap_or_else(|| ColumnEdit::from_column(column));
        merged.insert(column.name.clone(), edit);
    }
    for (name, edit) in edits {
        if !merged.contains_key(name) {
            merged.insert(name.clone(), edit.clone());
        }
    }
    merged
}
