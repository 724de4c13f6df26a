use crate::codegen::imports::ImportCollector;
use crate::codegen::{go_string, Generator, GENERATED_HEADER};
use crate::error::DaogenError;
use crate::render::RenderModel;

/// Generates the shared init file: connection holder and shadow-table map.
pub struct DaoGenerator;

impl Generator for DaoGenerator {
    fn generate(&self, model: &RenderModel) -> Result<String, DaogenError> {
        let mut imports = ImportCollector::new();
        imports.add("database/sql");

        let mut lines = vec![
            GENERATED_HEADER.to_string(),
            String::new(),
            format!("package {}", model.package),
            String::new(),
            imports.render(),
            String::new(),
            "var db *sql.DB".to_string(),
            String::new(),
            "// Init sets the connection used by every generated accessor.".to_string(),
            "func Init(conn *sql.DB) {".to_string(),
            "\tdb = conn".to_string(),
            "}".to_string(),
            String::new(),
            "// DB returns the connection set by Init.".to_string(),
            "func DB() *sql.DB {".to_string(),
            "\treturn db".to_string(),
            "}".to_string(),
            String::new(),
            "// ShadowTables maps each shadow table to its base table.".to_string(),
        ];

        if model.shadow_tables.is_empty() {
            lines.push("var ShadowTables = map[string]string{}".to_string());
        } else {
            lines.push("var ShadowTables = map[string]string{".to_string());
            for (shadow, base) in &model.shadow_tables {
                lines.push(format!("\t{}: {},", go_string(shadow), go_string(base)));
            }
            lines.push("}".to_string());
        }

        lines.extend([
            String::new(),
            "// ShadowTableOf returns the shadow table paired with base.".to_string(),
            "func ShadowTableOf(base string) (string, bool) {".to_string(),
            "\tfor shadow, b := range ShadowTables {".to_string(),
            "\t\tif b == base {".to_string(),
            "\t\t\treturn shadow, true".to_string(),
            "\t\t}".to_string(),
            "\t}".to_string(),
            "\treturn \"\", false".to_string(),
            "}".to_string(),
        ]);

        let mut output = lines.join("\n");
        output.push('\n');
        Ok(output)
    }
}
