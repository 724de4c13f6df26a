mod audit;
mod cli;
mod codegen;
mod error;
mod generate;
mod introspect;
mod keys;
mod naming;
mod output;
mod render;
mod schema;
mod shadow;
#[cfg(test)]
mod testutil;
mod typemap;

use std::fs;

use anyhow::Result;
use clap::Parser;
use sqlx::mysql::MySqlPoolOptions;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::introspect::mysql::MySqlIntrospector;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let url = cli.database_url()?;
    let config = cli.generate_config()?;
    fs::create_dir_all(&config.output_dir)?;

    tracing::info!("Connecting to database...");
    let pool = MySqlPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await?;

    let introspector = MySqlIntrospector::new(pool.clone());
    let mut resolver = cli.resolver();
    let result = generate::run(&introspector, &config, resolver.as_mut()).await;
    pool.close().await;
    let summary = result?;

    tracing::info!(
        "Generated {} files in {} ({} kept, {} tables failed)",
        summary.written.len(),
        config.output_dir.display(),
        summary.declined.len(),
        summary.failed.len()
    );

    Ok(())
}
