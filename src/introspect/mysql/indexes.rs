use std::collections::HashSet;

use sqlx::{MySqlPool, Row};

use super::{get_int, get_text, quote_table};
use crate::error::DaogenError;
use crate::schema::IndexRow;

pub async fn query_indexes(
    pool: &MySqlPool,
    table_name: &str,
) -> Result<Vec<IndexRow>, DaogenError> {
    let sql = format!("SHOW INDEX FROM {}", quote_table(table_name));
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    if let Some(first) = rows.first() {
        // 13 columns before MySQL 8, 15 after (`Visible`, `Expression`).
        tracing::debug!("SHOW INDEX for {table_name} returned {} columns", first.len());
    }

    let mut indexes = Vec::with_capacity(rows.len());
    for row in &rows {
        let seq = get_int(row, "Seq_in_index")?;
        indexes.push(IndexRow {
            table: get_text(row, "Table")?.unwrap_or_else(|| table_name.to_string()),
            is_unique: get_int(row, "Non_unique")? == 0,
            index_name: get_text(row, "Key_name")?.unwrap_or_default(),
            seq_in_index: u32::try_from(seq).unwrap_or_default(),
            // NULL for functional key parts on MySQL 8.
            column_name: get_text(row, "Column_name")?.unwrap_or_default(),
        });
    }

    Ok(drop_expression_indexes(indexes))
}

/// Remove every index that has a key part without a column.
///
/// Keeping the plain columns of such an index would claim a uniqueness the columns
/// alone do not have.
fn drop_expression_indexes(rows: Vec<IndexRow>) -> Vec<IndexRow> {
    let partial: HashSet<String> = rows
        .iter()
        .filter(|r| r.column_name.is_empty())
        .map(|r| r.index_name.clone())
        .collect();
    for name in &partial {
        tracing::debug!("Ignoring index {name}: it has expression key parts");
    }
    rows.into_iter()
        .filter(|r| !partial.contains(&r.index_name))
        .collect()
}
