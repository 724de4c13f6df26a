use sqlx::MySqlPool;

use super::{get_text, quote_table};
use crate::error::DaogenError;
use crate::schema::{ColumnDescriptor, KeyKind};

pub async fn query_columns(
    pool: &MySqlPool,
    table_name: &str,
) -> Result<Vec<ColumnDescriptor>, DaogenError> {
    let sql = format!("SHOW FULL COLUMNS FROM {}", quote_table(table_name));
    let rows = sqlx::query(&sql).fetch_all(pool).await?;

    let mut columns = Vec::with_capacity(rows.len());
    for row in &rows {
        let null = get_text(row, "Null")?.unwrap_or_default();
        columns.push(ColumnDescriptor {
            name: get_text(row, "Field")?.unwrap_or_default(),
            raw_type: get_text(row, "Type")?.unwrap_or_default(),
            is_nullable: null.eq_ignore_ascii_case("YES"),
            key: KeyKind::from_flag(&get_text(row, "Key")?.unwrap_or_default()),
            comment: get_text(row, "Comment")?.unwrap_or_default(),
        });
    }

    Ok(columns)
}
