use indexmap::IndexMap;

use crate::schema::{ColumnDescriptor, IndexRow, KeyKind};

/// Unique index name -> column names, in scan order.
pub type UniqueIndexes = IndexMap<String, Vec<String>>;

/// The primary key column and unique indexes of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableKeys {
    /// First column flagged as primary. Composite keys keep only this column.
    pub primary: Option<String>,
    pub unique_indexes: UniqueIndexes,
}

pub fn extract_keys(columns: &[ColumnDescriptor], rows: &[IndexRow]) -> TableKeys {
    let primary = columns
        .iter()
        .find(|c| c.key == KeyKind::Primary)
        .map(|c| c.name.clone());

    // Rows are trusted to arrive in `seq_in_index` order and are not re-sorted.
    let mut unique_indexes = UniqueIndexes::new();
    for row in rows.iter().filter(|r| r.is_unique) {
        unique_indexes
            .entry(row.index_name.clone())
            .or_default()
            .push(row.column_name.clone());
    }

    TableKeys {
        primary,
        unique_indexes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{column, index_row, primary};

    #[test]
    fn test_unique_only() {
        let rows = vec![
            index_row(false, "idx_a", 1, "a"),
            index_row(true, "PRIMARY", 1, "id"),
            index_row(true, "uq_b", 1, "b"),
        ];
        let keys = extract_keys(&[primary(column("id", "int"))], &rows);
        assert_eq!(keys.primary.as_deref(), Some("id"));
        assert_eq!(keys.unique_indexes.len(), 2);
        assert_eq!(keys.unique_indexes["PRIMARY"], vec!["id"]);
        assert_eq!(keys.unique_indexes["uq_b"], vec!["b"]);
        assert!(!keys.unique_indexes.contains_key("idx_a"));
    }

    #[test]
    fn test_composite_keeps_scan_order() {
        let rows = vec![
            index_row(true, "uq_ab", 2, "b"),
            index_row(true, "uq_ab", 1, "a"),
        ];
        let keys = extract_keys(&[], &rows);
        assert_eq!(keys.unique_indexes["uq_ab"], vec!["b", "a"]);
    }

    #[test]
    fn test_composite_primary_keeps_first_column() {
        let columns = vec![
            primary(column("tenant_id", "int")),
            primary(column("user_id", "int")),
        ];
        let keys = extract_keys(&columns, &[]);
        assert_eq!(keys.primary.as_deref(), Some("tenant_id"));
    }

    #[test]
    fn test_empty() {
        let keys = extract_keys(&[column("name", "text")], &[]);
        assert_eq!(keys, TableKeys::default());
    }
}
