use sqlx::MySqlPool;

use super::get_text;
use crate::error::DaogenError;

pub async fn query_tables(pool: &MySqlPool) -> Result<Vec<String>, DaogenError> {
    let rows = sqlx::query("SHOW TABLES").fetch_all(pool).await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in &rows {
        // The single column is named `Tables_in_<db>`.
        if let Some(name) = get_text(row, 0)? {
            tables.push(name);
        }
    }

    tracing::info!("Found {} tables", tables.len());
    Ok(tables)
}
