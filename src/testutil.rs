use indexmap::IndexMap;

use crate::error::DaogenError;
use crate::introspect::Introspector;
use crate::schema::{ColumnDescriptor, IndexRow, KeyKind};

/// Create a non-nullable, unkeyed column with no comment.
pub fn column(name: &str, raw_type: &str) -> ColumnDescriptor {
    ColumnDescriptor {
        name: name.to_string(),
        raw_type: raw_type.to_string(),
        is_nullable: false,
        key: KeyKind::None,
        comment: String::new(),
    }
}

pub fn nullable(col: ColumnDescriptor) -> ColumnDescriptor {
    ColumnDescriptor {
        is_nullable: true,
        ..col
    }
}

pub fn primary(col: ColumnDescriptor) -> ColumnDescriptor {
    ColumnDescriptor {
        key: KeyKind::Primary,
        ..col
    }
}

pub fn index_row(is_unique: bool, index_name: &str, seq: u32, column_name: &str) -> IndexRow {
    IndexRow {
        table: "t".to_string(),
        is_unique,
        index_name: index_name.to_string(),
        seq_in_index: seq,
        column_name: column_name.to_string(),
    }
}

/// In-memory schema keyed by table name, listed in insertion order.
#[derive(Debug, Default)]
pub struct FakeIntrospector {
    pub tables: IndexMap<String, (Vec<ColumnDescriptor>, Vec<IndexRow>)>,
    /// Tables whose column query fails.
    pub broken: Vec<String>,
}

impl FakeIntrospector {
    pub fn with_table(mut self, name: &str, columns: Vec<ColumnDescriptor>) -> Self {
        self.tables.insert(name.to_string(), (columns, Vec::new()));
        self
    }

    /// Attach index rows to a table added with `with_table`.
    pub fn with_indexes(mut self, name: &str, indexes: Vec<IndexRow>) -> Self {
        if let Some(entry) = self.tables.get_mut(name) {
            entry.1 = indexes;
        }
        self
    }

    pub fn with_broken(mut self, name: &str) -> Self {
        self.tables.insert(name.to_string(), (Vec::new(), Vec::new()));
        self.broken.push(name.to_string());
        self
    }
}

impl Introspector for FakeIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>, DaogenError> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DaogenError> {
        if self.broken.iter().any(|t| t == table) {
            return Err(DaogenError::Connection(format!("lost connection reading {table}")));
        }
        Ok(self.tables.get(table).map(|t| t.0.clone()).unwrap_or_default())
    }

    async fn list_indexes(&self, table: &str) -> Result<Vec<IndexRow>, DaogenError> {
        Ok(self.tables.get(table).map(|t| t.1.clone()).unwrap_or_default())
    }
}
