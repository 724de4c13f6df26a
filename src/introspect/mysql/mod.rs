mod columns;
mod indexes;
mod tables;

use sqlx::mysql::MySqlRow;
use sqlx::{ColumnIndex, MySqlPool, Row};

use crate::error::DaogenError;
use crate::introspect::Introspector;
use crate::schema::{ColumnDescriptor, IndexRow};

/// Reads schema metadata through `SHOW` statements.
pub struct MySqlIntrospector {
    pool: MySqlPool,
}

impl MySqlIntrospector {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

impl Introspector for MySqlIntrospector {
    async fn list_tables(&self) -> Result<Vec<String>, DaogenError> {
        tables::query_tables(&self.pool).await
    }

    async fn list_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DaogenError> {
        columns::query_columns(&self.pool, table).await
    }

    async fn list_indexes(&self, table: &str) -> Result<Vec<IndexRow>, DaogenError> {
        indexes::query_indexes(&self.pool, table).await
    }
}

/// Backtick-quote a table name for a `SHOW ... FROM` statement.
fn quote_table(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Read a text field that the server may report as a character or a binary type.
fn get_text<I>(row: &MySqlRow, index: I) -> Result<Option<String>, sqlx::Error>
where
    I: ColumnIndex<MySqlRow> + Copy,
{
    match row.try_get::<Option<String>, _>(index) {
        Ok(value) => Ok(value),
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let bytes: Option<Vec<u8>> = row.try_get(index)?;
            Ok(bytes.map(|b| String::from_utf8_lossy(&b).into_owned()))
        }
        Err(e) => Err(e),
    }
}

/// Read an integer field reported as signed, unsigned or text depending on the server.
fn get_int(row: &MySqlRow, column: &str) -> Result<i64, sqlx::Error> {
    if let Ok(value) = row.try_get::<i64, _>(column) {
        return Ok(value);
    }
    if let Ok(value) = row.try_get::<u64, _>(column) {
        return i64::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        });
    }
    let text = get_text(row, column)?.unwrap_or_default();
    text.trim()
        .parse()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_table() {
        assert_eq!(quote_table("users"), "`users`");
        assert_eq!(quote_table("odd`name"), "`odd``name`");
    }
}
