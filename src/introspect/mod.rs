pub mod mysql;

use crate::error::DaogenError;
use crate::schema::{ColumnDescriptor, IndexRow};

/// Source of schema metadata for one database.
#[allow(async_fn_in_trait)]
pub trait Introspector {
    /// Table names in the order the server reports them.
    async fn list_tables(&self) -> Result<Vec<String>, DaogenError>;

    /// Columns of `table` in declared order.
    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DaogenError>;

    /// Index rows of `table` as scanned.
    async fn list_indexes(&self, table: &str) -> Result<Vec<IndexRow>, DaogenError>;
}
