use indexmap::IndexMap;

use crate::audit::{detect_time_fields, TimeFields};
use crate::keys::{extract_keys, UniqueIndexes};
use crate::naming::Namer;
use crate::schema::{ColumnDescriptor, IndexRow, KeyKind};
use crate::typemap::{map_column_type, ImportTag, TypeOptions, TypeTier};

/// Shadow table name -> base table name.
pub type ShadowTables = IndexMap<String, String>;

/// Naming and type-mapping configuration shared by every model built in a run.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    pub namer: Namer,
    pub types: TypeOptions,
}

/// One column, normalized for code emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrModel {
    /// Exported field name, e.g. `UserID`.
    pub name: String,
    /// Lower camel name, e.g. `userID`.
    pub private_name: String,
    /// `private_name` made safe against reserved words.
    pub safe_name: String,
    pub tier: TypeTier,
    /// Serialization tag, always the raw column name.
    pub tag: String,
    pub comment: String,
    pub is_pk: bool,
    pub has_index: bool,
}

/// Everything a template needs for one generated file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderModel {
    pub package: String,
    pub table: String,
    pub table_exported: String,
    pub table_private: String,
    pub primary: Option<String>,
    pub attrs: Vec<AttrModel>,
    pub unique_indexes: UniqueIndexes,
    pub time_fields: TimeFields,
    /// Distinct dependencies required by the attribute tiers, first-seen order.
    pub imports: Vec<ImportTag>,
    /// Only populated on the init model.
    pub shadow_tables: ShadowTables,
}

impl RenderModel {
    pub fn attr(&self, column: &str) -> Option<&AttrModel> {
        self.attrs.iter().find(|a| a.tag == column)
    }

    pub fn primary_attr(&self) -> Option<&AttrModel> {
        self.attrs.iter().find(|a| a.is_pk)
    }
}

/// Assemble the model for one table. Returns `None` when the table has no columns.
pub fn build_table_model(
    package: &str,
    table: &str,
    columns: &[ColumnDescriptor],
    indexes: &[IndexRow],
    config: &ModelConfig,
) -> Option<RenderModel> {
    if columns.is_empty() {
        return None;
    }

    let keys = extract_keys(columns, indexes);
    let mut imports = Vec::new();
    let mut attrs = Vec::with_capacity(columns.len());

    for column in columns {
        let tier = map_column_type(
            &column.raw_type,
            column.is_nullable,
            &config.namer,
            &config.types,
        );
        if let Some(tag) = tier.import_tag() {
            if !imports.contains(&tag) {
                imports.push(tag);
            }
        }

        let ident = config.namer.identifier(&column.name);
        attrs.push(AttrModel {
            name: ident.exported,
            private_name: ident.private,
            safe_name: ident.safe,
            tier,
            tag: column.name.clone(),
            comment: column.comment.clone(),
            is_pk: keys.primary.as_deref() == Some(column.name.as_str()),
            has_index: column.key != KeyKind::None,
        });
    }

    Some(RenderModel {
        package: package.to_string(),
        table: table.to_string(),
        table_exported: config.namer.exported(table),
        table_private: config.namer.private(table),
        primary: keys.primary,
        attrs,
        unique_indexes: keys.unique_indexes,
        time_fields: detect_time_fields(columns),
        imports,
        shadow_tables: ShadowTables::new(),
    })
}

/// The table-independent model for the shared init file.
pub fn build_init_model(package: &str, shadow_tables: ShadowTables) -> RenderModel {
    RenderModel {
        package: package.to_string(),
        shadow_tables,
        ..RenderModel::default()
    }
}
