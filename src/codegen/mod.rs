pub mod conds;
pub mod dao;
pub mod imports;
pub mod table;

use crate::audit::TimeKind;
use crate::error::DaogenError;
use crate::render::RenderModel;
use crate::typemap::{IntWidth, ScalarType, TypeTier};

use self::conds::CondsGenerator;
use self::dao::DaoGenerator;
use self::table::TableGenerator;

/// Header carried by every generated file.
pub const GENERATED_HEADER: &str = "// Code generated by daogen. DO NOT EDIT.";

/// Trait for code generators.
pub trait Generator {
    fn generate(&self, model: &RenderModel) -> Result<String, DaogenError>;
}

/// The files produced from render models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Per-table entity and accessors.
    Table,
    /// Per-table condition builder.
    Conds,
    /// Shared init file.
    Dao,
}

impl Template {
    pub fn name(&self) -> &'static str {
        match self {
            Template::Table => "table",
            Template::Conds => "conds",
            Template::Dao => "dao",
        }
    }

    /// Output file name: `user_info` -> `userinfo.go` / `userinfoconds.go`.
    pub fn file_name(&self, model: &RenderModel) -> Result<String, DaogenError> {
        if *self == Template::Dao {
            return Ok("dao.go".to_string());
        }
        let stem = model.table.replace('_', "");
        if stem.is_empty() {
            return Err(DaogenError::InvalidFileName(model.table.clone()));
        }
        Ok(match self {
            Template::Conds => format!("{stem}conds.go"),
            _ => format!("{stem}.go"),
        })
    }
}

/// Render a model with the given template.
pub fn render(model: &RenderModel, template: Template) -> Result<String, DaogenError> {
    match template {
        Template::Table => TableGenerator.generate(model),
        Template::Conds => CondsGenerator.generate(model),
        Template::Dao => DaoGenerator.generate(model),
    }
}

/// Reject table models that cannot produce a compilable file.
fn check_table_model(model: &RenderModel, template: Template) -> Result<(), DaogenError> {
    let reason = if model.table.is_empty() {
        "model has no table name"
    } else if model.attrs.is_empty() {
        "model has no attributes"
    } else {
        return Ok(());
    };
    Err(DaogenError::Render {
        template: template.name(),
        reason: reason.to_string(),
    })
}

/// Go type of a bare scalar.
pub fn go_scalar(scalar: &ScalarType) -> String {
    match scalar {
        ScalarType::Bool => "bool".to_string(),
        ScalarType::Int(width) => format!("int{}", width_suffix(*width)),
        ScalarType::Uint(width) => format!("uint{}", width_suffix(*width)),
        ScalarType::Float32 => "float32".to_string(),
        ScalarType::Float64 => "float64".to_string(),
        ScalarType::Decimal => "decimal.Decimal".to_string(),
        ScalarType::String => "string".to_string(),
        ScalarType::Bytes => "[]byte".to_string(),
        ScalarType::Timestamp => "time.Time".to_string(),
        ScalarType::Custom(name) => name.clone(),
    }
}

/// Go type of a field, using the `database/sql` null wrappers for optional tiers.
pub fn go_type(tier: &TypeTier) -> String {
    let scalar = match tier {
        TypeTier::Value(scalar) => return go_scalar(scalar),
        TypeTier::Optional(scalar) => scalar,
    };
    match scalar {
        ScalarType::Bool => "sql.NullBool".to_string(),
        ScalarType::Int(IntWidth::W8 | IntWidth::W16) => "sql.NullInt16".to_string(),
        ScalarType::Int(IntWidth::W32) => "sql.NullInt32".to_string(),
        ScalarType::Int(_) | ScalarType::Uint(_) => "sql.NullInt64".to_string(),
        ScalarType::Float32 | ScalarType::Float64 => "sql.NullFloat64".to_string(),
        ScalarType::Decimal => "decimal.NullDecimal".to_string(),
        ScalarType::String => "sql.NullString".to_string(),
        ScalarType::Bytes => "[]byte".to_string(),
        ScalarType::Timestamp => "sql.NullTime".to_string(),
        ScalarType::Custom(name) => format!("*{name}"),
    }
}

fn width_suffix(width: IntWidth) -> &'static str {
    match width {
        IntWidth::W8 => "8",
        IntWidth::W16 => "16",
        IntWidth::W32 => "32",
        IntWidth::Native => "",
        IntWidth::W64 => "64",
    }
}

/// Go expression assigning the current instant (`now`) to an audit field, if the
/// field's type supports it.
pub fn now_expr(tier: &TypeTier, kind: TimeKind) -> Option<String> {
    let expr = match (kind, tier) {
        (TimeKind::Calendar, TypeTier::Value(ScalarType::Timestamp)) => "now".to_string(),
        (TimeKind::Calendar, TypeTier::Optional(ScalarType::Timestamp)) => {
            "sql.NullTime{Time: now, Valid: true}".to_string()
        }
        (TimeKind::Epoch, TypeTier::Value(ScalarType::Int(IntWidth::W64))) => {
            "now.Unix()".to_string()
        }
        (TimeKind::Epoch, TypeTier::Value(scalar @ (ScalarType::Int(_) | ScalarType::Uint(_)))) => {
            format!("{}(now.Unix())", go_scalar(scalar))
        }
        (TimeKind::Epoch, TypeTier::Optional(ScalarType::Int(IntWidth::W32))) => {
            "sql.NullInt32{Int32: int32(now.Unix()), Valid: true}".to_string()
        }
        (
            TimeKind::Epoch,
            TypeTier::Optional(ScalarType::Int(IntWidth::Native | IntWidth::W64) | ScalarType::Uint(_)),
        ) => "sql.NullInt64{Int64: now.Unix(), Valid: true}".to_string(),
        _ => return None,
    };
    Some(expr)
}

/// Backtick-quote a MySQL identifier.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Go interpreted string literal.
pub fn go_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Collapse a schema comment onto one line for a `//` comment.
pub fn one_line(comment: &str) -> String {
    comment.split_whitespace().collect::<Vec<_>>().join(" ")
}
