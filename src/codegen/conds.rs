use crate::codegen::imports::ImportCollector;
use crate::codegen::{
    check_table_model, go_scalar, go_string, quote_ident, Generator, Template, GENERATED_HEADER,
};
use crate::error::DaogenError;
use crate::render::{AttrModel, RenderModel};
use crate::typemap::ScalarType;

/// Generates the chainable WHERE-clause builder for one table.
pub struct CondsGenerator;

impl Generator for CondsGenerator {
    fn generate(&self, model: &RenderModel) -> Result<String, DaogenError> {
        check_table_model(model, Template::Conds)?;

        let conds = format!("{}Conds", model.table_exported);
        let mut imports = ImportCollector::new();
        imports.add("strings");

        let mut blocks = vec![[
            format!("// {conds} builds the WHERE clause of a {} query.", model.table),
            format!("type {conds} struct {{"),
            "\tclauses []string".to_string(),
            "\targs    []any".to_string(),
            "}".to_string(),
            String::new(),
            format!("// New{conds} returns an empty condition set."),
            format!("func New{conds}() *{conds} {{"),
            format!("\treturn &{conds}{{}}"),
            "}".to_string(),
        ]
        .join("\n")];

        for attr in &model.attrs {
            match attr.tier.scalar() {
                ScalarType::Timestamp => imports.add("time"),
                ScalarType::Decimal => imports.add("github.com/shopspring/decimal"),
                _ => {}
            }
            blocks.push(generate_eq(&conds, attr));
            if attr.has_index {
                blocks.push(generate_in(&conds, attr));
            }
            if attr.tier.is_optional() {
                blocks.push(generate_is_null(&conds, attr));
            }
        }

        blocks.push(
            [
                format!("func (c *{conds}) add(clause string, args ...any) *{conds} {{"),
                "\tc.clauses = append(c.clauses, clause)".to_string(),
                "\tc.args = append(c.args, args...)".to_string(),
                "\treturn c".to_string(),
                "}".to_string(),
                String::new(),
                "// Where renders the conditions joined with AND, prefixed by WHERE.".to_string(),
                format!("func (c *{conds}) Where() (string, []any) {{"),
                "\tif len(c.clauses) == 0 {".to_string(),
                "\t\treturn \"\", nil".to_string(),
                "\t}".to_string(),
                "\treturn \" WHERE \" + strings.Join(c.clauses, \" AND \"), c.args".to_string(),
                "}".to_string(),
            ]
            .join("\n"),
        );

        let mut output = format!(
            "{GENERATED_HEADER}\n\npackage {}\n\n{}\n",
            model.package,
            imports.render()
        );
        for block in blocks {
            output.push('\n');
            output.push_str(&block);
            output.push('\n');
        }
        Ok(output)
    }
}

fn generate_eq(conds: &str, attr: &AttrModel) -> String {
    let column = quote_ident(&attr.tag);
    [
        format!("// {}Eq matches rows whose {column} equals v.", attr.name),
        format!(
            "func (c *{conds}) {}Eq(v {}) *{conds} {{",
            attr.name,
            go_scalar(attr.tier.scalar())
        ),
        format!("\treturn c.add({}, v)", go_string(&format!("{column} = ?"))),
        "}".to_string(),
    ]
    .join("\n")
}

fn generate_in(conds: &str, attr: &AttrModel) -> String {
    let column = quote_ident(&attr.tag);
    [
        format!("// {}In matches rows whose {column} is one of vs.", attr.name),
        format!(
            "func (c *{conds}) {}In(vs ...{}) *{conds} {{",
            attr.name,
            go_scalar(attr.tier.scalar())
        ),
        "\tif len(vs) == 0 {".to_string(),
        "\t\treturn c.add(\"1 = 0\")".to_string(),
        "\t}".to_string(),
        "\targs := make([]any, len(vs))".to_string(),
        "\tfor i, v := range vs {".to_string(),
        "\t\targs[i] = v".to_string(),
        "\t}".to_string(),
        format!(
            "\treturn c.add({}+strings.Repeat(\", ?\", len(vs)-1)+\")\", args...)",
            go_string(&format!("{column} IN (?"))
        ),
        "}".to_string(),
    ]
    .join("\n")
}

fn generate_is_null(conds: &str, attr: &AttrModel) -> String {
    let column = quote_ident(&attr.tag);
    [
        format!("// {}IsNull matches rows whose {column} is NULL.", attr.name),
        format!("func (c *{conds}) {}IsNull() *{conds} {{", attr.name),
        format!("\treturn c.add({})", go_string(&format!("{column} IS NULL"))),
        "}".to_string(),
    ]
    .join("\n")
}
