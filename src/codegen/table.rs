use std::collections::HashSet;

use crate::audit::TimeField;
use crate::codegen::imports::ImportCollector;
use crate::codegen::{
    check_table_model, go_string, go_type, now_expr, one_line, quote_ident, Generator,
    Template, GENERATED_HEADER,
};
use crate::error::DaogenError;
use crate::render::{AttrModel, RenderModel};

/// Locals and imported packages referenced inside generated functions; parameters must
/// not shadow them.
const GO_LOCALS: &[&str] = &[
    "context", "ctx", "db", "err", "errors", "m", "now", "res", "rows", "sql", "time",
];

/// Generates the entity struct and accessors for one table.
pub struct TableGenerator;

impl Generator for TableGenerator {
    fn generate(&self, model: &RenderModel) -> Result<String, DaogenError> {
        check_table_model(model, Template::Table)?;

        let mut imports = ImportCollector::new();
        imports.add("context");
        imports.add("database/sql");
        for tag in &model.imports {
            imports.add_tag(*tag);
        }

        let entity = &model.table_exported;
        let mut blocks: Vec<String> = vec![
            generate_consts(model),
            generate_struct(model),
            generate_scanners(model),
            generate_insert(model, &mut imports),
            generate_query(model),
        ];

        let mut finders: HashSet<String> = HashSet::new();
        if let Some(pk) = model.primary_attr() {
            let name = format!("Find{entity}By{}", pk.name);
            blocks.push(generate_find(model, &[pk], &name));
            finders.insert(name);
            if let Some(update) = generate_update(model, pk, &mut imports) {
                blocks.push(update);
            }
            blocks.push(generate_delete(model, pk));
        }

        for (index_name, columns) in &model.unique_indexes {
            if model.primary.as_ref().is_some_and(|pk| columns == &[pk.clone()]) {
                continue;
            }
            let attrs = columns
                .iter()
                .map(|c| {
                    model.attr(c).ok_or_else(|| DaogenError::Render {
                        template: Template::Table.name(),
                        reason: format!("unique index {index_name} references unknown column {c}"),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let names: Vec<&str> = attrs.iter().map(|a| a.name.as_str()).collect();
            let name = format!("Find{entity}By{}", names.join("And"));
            if finders.insert(name.clone()) {
                blocks.push(generate_find(model, &attrs, &name));
            }
        }

        if !finders.is_empty() {
            imports.add("errors");
        }

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

fn generate_consts(model: &RenderModel) -> String {
    let columns: Vec<String> = model.attrs.iter().map(|a| quote_ident(&a.tag)).collect();
    [
        format!(
            "// {}Table is the name of the {} table.",
            model.table_exported, model.table
        ),
        format!(
            "const {}Table = {}",
            model.table_exported,
            go_string(&model.table)
        ),
        String::new(),
        format!(
            "const {}Columns = {}",
            model.table_private,
            go_string(&columns.join(", "))
        ),
    ]
    .join("\n")
}

fn generate_struct(model: &RenderModel) -> String {
    let types: Vec<String> = model.attrs.iter().map(|a| go_type(&a.tier)).collect();
    let name_width = model.attrs.iter().map(|a| a.name.len()).max().unwrap_or(0);
    let type_width = types.iter().map(|t| t.len()).max().unwrap_or(0);

    let mut lines = vec![
        format!(
            "// {} maps a row of the {} table.",
            model.table_exported, model.table
        ),
        format!("type {} struct {{", model.table_exported),
    ];
    for (attr, ty) in model.attrs.iter().zip(&types) {
        let mut line = format!(
            "\t{:<name_width$} {:<type_width$} `db:\"{}\"`",
            attr.name, ty, attr.tag
        );
        if !attr.comment.trim().is_empty() {
            line.push_str(&format!(" // {}", one_line(&attr.comment)));
        }
        lines.push(line);
    }
    lines.push("}".to_string());
    lines.join("\n")
}

fn generate_scanners(model: &RenderModel) -> String {
    let entity = &model.table_exported;
    let fields: Vec<String> = model.attrs.iter().map(|a| format!("&m.{}", a.name)).collect();
    [
        format!("func (m *{entity}) scanFields() []any {{"),
        format!("\treturn []any{{{}}}", fields.join(", ")),
        "}".to_string(),
        String::new(),
        format!("func scan{entity}Rows(rows *sql.Rows) ([]*{entity}, error) {{"),
        "\tdefer rows.Close()".to_string(),
        format!("\tvar list []*{entity}"),
        "\tfor rows.Next() {".to_string(),
        format!("\t\tm := &{entity}{{}}"),
        "\t\tif err := rows.Scan(m.scanFields()...); err != nil {".to_string(),
        "\t\t\treturn nil, err".to_string(),
        "\t\t}".to_string(),
        "\t\tlist = append(list, m)".to_string(),
        "\t}".to_string(),
        "\treturn list, rows.Err()".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

/// Assignments refreshing the given audit fields to `now`, preceded by its declaration.
fn stamp_lines(
    model: &RenderModel,
    fields: &[Option<&TimeField>],
    imports: &mut ImportCollector,
) -> Vec<String> {
    let assignments: Vec<String> = fields
        .iter()
        .flatten()
        .filter_map(|field| {
            let attr = model.attr(&field.column)?;
            let expr = now_expr(&attr.tier, field.kind)?;
            Some(format!("\tm.{} = {expr}", attr.name))
        })
        .collect();
    if assignments.is_empty() {
        return assignments;
    }
    imports.add("time");
    let mut lines = vec!["\tnow := time.Now()".to_string()];
    lines.extend(assignments);
    lines
}

fn generate_insert(model: &RenderModel, imports: &mut ImportCollector) -> String {
    let entity = &model.table_exported;
    let columns: Vec<String> = model.attrs.iter().map(|a| quote_ident(&a.tag)).collect();
    let placeholders = vec!["?"; model.attrs.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({placeholders})",
        quote_ident(&model.table),
        columns.join(", ")
    );
    let args: Vec<String> = model.attrs.iter().map(|a| format!("m.{}", a.name)).collect();

    let mut lines = vec![
        format!("// Insert{entity} inserts m and returns the last insert id."),
        format!("func Insert{entity}(ctx context.Context, m *{entity}) (int64, error) {{"),
    ];
    let time_fields = &model.time_fields;
    lines.extend(stamp_lines(
        model,
        &[time_fields.create.as_ref(), time_fields.update.as_ref()],
        imports,
    ));
    lines.push(format!(
        "\tres, err := db.ExecContext(ctx, {}, {})",
        go_string(&sql),
        args.join(", ")
    ));
    lines.extend(exec_result("LastInsertId"));
    lines.join("\n")
}

fn generate_query(model: &RenderModel) -> String {
    let entity = &model.table_exported;
    [
        format!("// Query{entity} returns the rows matching conds; nil conds matches every row."),
        format!(
            "func Query{entity}(ctx context.Context, conds *{entity}Conds) ([]*{entity}, error) {{"
        ),
        format!(
            "\tquery := \"SELECT \" + {}Columns + {}",
            model.table_private,
            go_string(&format!(" FROM {}", quote_ident(&model.table)))
        ),
        "\tvar args []any".to_string(),
        "\tif conds != nil {".to_string(),
        "\t\tvar where string".to_string(),
        "\t\twhere, args = conds.Where()".to_string(),
        "\t\tquery += where".to_string(),
        "\t}".to_string(),
        "\trows, err := db.QueryContext(ctx, query, args...)".to_string(),
        "\tif err != nil {".to_string(),
        "\t\treturn nil, err".to_string(),
        "\t}".to_string(),
        format!("\treturn scan{entity}Rows(rows)"),
        "}".to_string(),
    ]
    .join("\n")
}

fn generate_find(model: &RenderModel, attrs: &[&AttrModel], name: &str) -> String {
    let entity = &model.table_exported;
    let params: Vec<String> = attrs
        .iter()
        .map(|a| format!("{} {}", param_name(a), go_type(&a.tier)))
        .collect();
    let args: Vec<String> = attrs.iter().map(|a| param_name(a)).collect();
    let columns: Vec<&str> = attrs.iter().map(|a| a.tag.as_str()).collect();

    [
        format!(
            "// {name} returns the row matching {}, or nil when none does.",
            columns.join(" and ")
        ),
        format!(
            "func {name}(ctx context.Context, {}) (*{entity}, error) {{",
            params.join(", ")
        ),
        format!("\tm := &{entity}{{}}"),
        format!(
            "\terr := db.QueryRowContext(ctx, \"SELECT \"+{}Columns+{}, {}).Scan(m.scanFields()...)",
            model.table_private,
            go_string(&format!(
                " FROM {} WHERE {}",
                quote_ident(&model.table),
                where_clause(attrs)
            )),
            args.join(", ")
        ),
        "\tif errors.Is(err, sql.ErrNoRows) {".to_string(),
        "\t\treturn nil, nil".to_string(),
        "\t}".to_string(),
        "\tif err != nil {".to_string(),
        "\t\treturn nil, err".to_string(),
        "\t}".to_string(),
        "\treturn m, nil".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

fn generate_update(
    model: &RenderModel,
    pk: &AttrModel,
    imports: &mut ImportCollector,
) -> Option<String> {
    let entity = &model.table_exported;
    let create = model.time_fields.create.as_ref().map(|f| f.column.as_str());
    let set: Vec<&AttrModel> = model
        .attrs
        .iter()
        .filter(|a| !a.is_pk && Some(a.tag.as_str()) != create)
        .collect();
    if set.is_empty() {
        return None;
    }

    let assignments: Vec<String> = set
        .iter()
        .map(|a| format!("{} = ?", quote_ident(&a.tag)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_ident(&model.table),
        assignments.join(", "),
        quote_ident(&pk.tag)
    );
    let mut args: Vec<String> = set.iter().map(|a| format!("m.{}", a.name)).collect();
    args.push(format!("m.{}", pk.name));

    let mut lines = vec![
        format!(
            "// Update{entity}By{} writes every column of m except the primary key and creation time.",
            pk.name
        ),
        format!(
            "func Update{entity}By{}(ctx context.Context, m *{entity}) (int64, error) {{",
            pk.name
        ),
    ];
    lines.extend(stamp_lines(
        model,
        &[model.time_fields.update.as_ref()],
        imports,
    ));
    lines.push(format!(
        "\tres, err := db.ExecContext(ctx, {}, {})",
        go_string(&sql),
        args.join(", ")
    ));
    lines.extend(exec_result("RowsAffected"));
    Some(lines.join("\n"))
}

fn generate_delete(model: &RenderModel, pk: &AttrModel) -> String {
    let entity = &model.table_exported;
    let param = param_name(pk);
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quote_ident(&model.table),
        quote_ident(&pk.tag)
    );
    let mut lines = vec![
        format!("// Delete{entity}By{} deletes the row with the given {}.", pk.name, pk.tag),
        format!(
            "func Delete{entity}By{}(ctx context.Context, {param} {}) (int64, error) {{",
            pk.name,
            go_type(&pk.tier)
        ),
        format!(
            "\tres, err := db.ExecContext(ctx, {}, {param})",
            go_string(&sql)
        ),
    ];
    lines.extend(exec_result("RowsAffected"));
    lines.join("\n")
}

/// Tail of a function returning `(int64, error)` from `res, err`.
fn exec_result(method: &str) -> Vec<String> {
    vec![
        "\tif err != nil {".to_string(),
        "\t\treturn 0, err".to_string(),
        "\t}".to_string(),
        format!("\treturn res.{method}()"),
        "}".to_string(),
    ]
}

fn where_clause(attrs: &[&AttrModel]) -> String {
    attrs
        .iter()
        .map(|a| format!("{} = ?", quote_ident(&a.tag)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn param_name(attr: &AttrModel) -> String {
    if GO_LOCALS.contains(&attr.safe_name.as_str()) {
        format!("{}Value", attr.safe_name)
    } else {
        attr.safe_name.clone()
    }
}
