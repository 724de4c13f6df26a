use std::path::{Path, PathBuf};

use crate::codegen::{render, Template};
use crate::error::DaogenError;
use crate::introspect::Introspector;
use crate::output::{write_file, ConflictResolver};
use crate::render::{build_init_model, build_table_model, ModelConfig, RenderModel};
use crate::shadow::{pair_shadow_tables, DEFAULT_SHADOW_PREFIX, DEFAULT_SHADOW_SUFFIX};

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output_dir: PathBuf,
    /// Go package name of every generated file.
    pub package: String,
    /// When non-empty, only these tables get per-table files.
    pub tables: Vec<String>,
    pub shadow_prefix: String,
    pub shadow_suffix: String,
    pub model: ModelConfig,
}

impl GenerateConfig {
    pub fn new(output_dir: PathBuf, package: String) -> Self {
        Self {
            output_dir,
            package,
            tables: Vec::new(),
            shadow_prefix: DEFAULT_SHADOW_PREFIX.to_string(),
            shadow_suffix: DEFAULT_SHADOW_SUFFIX.to_string(),
            model: ModelConfig::default(),
        }
    }

    fn wants(&self, table: &str) -> bool {
        self.tables.is_empty() || self.tables.iter().any(|t| t == table)
    }
}

/// Outcome of a run.
#[derive(Debug, Default)]
pub struct Summary {
    pub written: Vec<PathBuf>,
    /// Existing files the resolver chose to keep.
    pub declined: Vec<PathBuf>,
    pub failed: Vec<String>,
}

impl Summary {
    /// Record a write; declined overwrites are absorbed, other errors returned.
    fn record(&mut self, result: Result<PathBuf, DaogenError>) -> Result<(), DaogenError> {
        match result {
            Ok(path) => {
                tracing::info!("Wrote {}", path.display());
                self.written.push(path);
                Ok(())
            }
            Err(e) if e.is_declined() => {
                tracing::info!("{e}");
                if let DaogenError::Declined(path) = e {
                    self.declined.push(path);
                }
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Generate the init file and per-table files for every table `introspector` lists.
///
/// Only an empty table listing (or a failure to list) is fatal; anything that goes
/// wrong for a single table is logged and recorded in `Summary::failed`.
pub async fn run<I: Introspector>(
    introspector: &I,
    config: &GenerateConfig,
    resolver: &mut dyn ConflictResolver,
) -> Result<Summary, DaogenError> {
    let tables = introspector.list_tables().await?;
    if tables.is_empty() {
        return Err(DaogenError::NoTables);
    }

    for wanted in &config.tables {
        if !tables.contains(wanted) {
            tracing::warn!("Table {wanted} not found in database");
        }
    }

    let pairing = pair_shadow_tables(&tables, &config.shadow_prefix, &config.shadow_suffix);
    let mut summary = Summary::default();

    let init = build_init_model(&config.package, pairing.shadows);
    let result = emit(&init, Template::Dao, &config.output_dir, resolver);
    if let Err(e) = summary.record(result) {
        tracing::error!("Failed to write init file: {e}");
    }

    for table in pairing.standalone.iter().filter(|t| config.wants(t)) {
        if let Err(e) = generate_table(introspector, table, config, resolver, &mut summary).await {
            tracing::error!("Skipping table {table}: {e}");
            summary.failed.push(table.clone());
        }
    }

    Ok(summary)
}

async fn generate_table<I: Introspector>(
    introspector: &I,
    table: &str,
    config: &GenerateConfig,
    resolver: &mut dyn ConflictResolver,
    summary: &mut Summary,
) -> Result<(), DaogenError> {
    let columns = introspector.list_columns(table).await?;
    let indexes = introspector.list_indexes(table).await?;

    let Some(model) =
        build_table_model(&config.package, table, &columns, &indexes, &config.model)
    else {
        tracing::warn!("Table {table} has no columns, skipping");
        return Ok(());
    };

    for template in [Template::Table, Template::Conds] {
        summary.record(emit(&model, template, &config.output_dir, resolver))?;
    }
    Ok(())
}

fn emit(
    model: &RenderModel,
    template: Template,
    dir: &Path,
    resolver: &mut dyn ConflictResolver,
) -> Result<PathBuf, DaogenError> {
    let source = render(model, template)?;
    let name = template.file_name(model)?;
    write_file(dir, &name, &source, resolver)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::output::{AlwaysOverwrite, NeverOverwrite};
    use crate::testutil::{column, index_row, primary, FakeIntrospector};

    fn config(dir: &Path) -> GenerateConfig {
        GenerateConfig::new(dir.to_path_buf(), "dao".to_string())
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    fn schema() -> FakeIntrospector {
        FakeIntrospector::default()
            .with_table(
                "user_info",
                vec![primary(column("id", "int")), column("name", "varchar(20)")],
            )
            .with_table("fct_user_info", vec![primary(column("id", "int"))])
            .with_table("orders", vec![primary(column("order_id", "bigint"))])
    }

    #[tokio::test]
    async fn test_generates_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let summary = run(&schema(), &config(dir.path()), &mut NeverOverwrite)
            .await
            .unwrap();

        assert_eq!(
            file_names(&summary.written),
            vec![
                "dao.go",
                "userinfo.go",
                "userinfoconds.go",
                "orders.go",
                "ordersconds.go"
            ]
        );
        assert!(summary.declined.is_empty());
        assert!(summary.failed.is_empty());

        let dao = fs::read_to_string(dir.path().join("dao.go")).unwrap();
        assert!(dao.contains("\t\"fct_user_info\": \"user_info\",\n"));
        assert!(!dir.path().join("fctuserinfo.go").exists());

        let table = fs::read_to_string(dir.path().join("userinfo.go")).unwrap();
        assert!(table.starts_with("// Code generated by daogen. DO NOT EDIT.\n\npackage dao\n"));
        assert!(table.contains("type UserInfo struct {"));
    }

    #[tokio::test]
    async fn test_unique_index_finder_written() {
        let dir = tempfile::tempdir().unwrap();
        let introspector = FakeIntrospector::default()
            .with_table(
                "accounts",
                vec![primary(column("id", "int")), column("email", "varchar(100)")],
            )
            .with_indexes(
                "accounts",
                vec![
                    index_row(true, "PRIMARY", 1, "id"),
                    index_row(true, "uq_email", 1, "email"),
                    index_row(false, "idx_id_email", 1, "id"),
                ],
            );
        run(&introspector, &config(dir.path()), &mut NeverOverwrite)
            .await
            .unwrap();

        let table = fs::read_to_string(dir.path().join("accounts.go")).unwrap();
        assert!(table.contains(
            "func FindAccountsByEmail(ctx context.Context, email string) (*Accounts, error) {"
        ));
        assert_eq!(table.matches("func FindAccountsBy").count(), 2);
    }

    #[tokio::test]
    async fn test_table_filter_keeps_init_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path());
        cfg.tables = vec!["orders".to_string(), "missing".to_string()];
        let summary = run(&schema(), &cfg, &mut NeverOverwrite).await.unwrap();

        assert_eq!(
            file_names(&summary.written),
            vec!["dao.go", "orders.go", "ordersconds.go"]
        );
    }

    #[tokio::test]
    async fn test_no_tables_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(&FakeIntrospector::default(), &config(dir.path()), &mut NeverOverwrite)
            .await
            .unwrap_err();
        assert!(matches!(err, DaogenError::NoTables));
        assert!(!dir.path().join("dao.go").exists());
    }

    #[tokio::test]
    async fn test_table_failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let introspector = FakeIntrospector::default()
            .with_broken("audit_log")
            .with_table("empty", Vec::new())
            .with_table("orders", vec![primary(column("id", "int"))]);
        let summary = run(&introspector, &config(dir.path()), &mut NeverOverwrite)
            .await
            .unwrap();

        assert_eq!(summary.failed, vec!["audit_log".to_string()]);
        assert_eq!(
            file_names(&summary.written),
            vec!["dao.go", "orders.go", "ordersconds.go"]
        );
        assert!(!dir.path().join("empty.go").exists());
    }

    #[tokio::test]
    async fn test_declined_files_are_recorded() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("dao.go"), "// mine\n").unwrap();
        fs::write(dir.path().join("orders.go"), "// mine\n").unwrap();

        let summary = run(&schema(), &config(dir.path()), &mut NeverOverwrite)
            .await
            .unwrap();
        assert_eq!(file_names(&summary.declined), vec!["dao.go", "orders.go"]);
        assert!(summary.failed.is_empty());
        assert!(dir.path().join("ordersconds.go").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("orders.go")).unwrap(),
            "// mine\n"
        );

        let summary = run(&schema(), &config(dir.path()), &mut AlwaysOverwrite)
            .await
            .unwrap();
        assert!(summary.declined.is_empty());
        assert_eq!(summary.written.len(), 5);
    }

    #[tokio::test]
    async fn test_unwritable_init_file_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("dao.go")).unwrap();

        let summary = run(&schema(), &config(dir.path()), &mut AlwaysOverwrite)
            .await
            .unwrap();
        assert_eq!(summary.written.len(), 4);
        assert!(summary.failed.is_empty());
    }
}
