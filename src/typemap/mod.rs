pub mod precision;

use crate::naming::Namer;

pub use precision::{parse_precision_scale, ParsedType};

/// Integer width, ordered narrowest to widest.
///
/// `Native` is the platform integer; it is at least 32 bits and never wider than 64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    Native,
    W64,
}

/// The value category a column is normalized into, independent of the target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarType {
    Bool,
    Int(IntWidth),
    Uint(IntWidth),
    Float32,
    Float64,
    /// Arbitrary-precision decimal, only produced with [`TypeOptions::precise_decimal`].
    Decimal,
    String,
    Bytes,
    Timestamp,
    /// Unknown database type, named after its base type.
    Custom(String),
}

/// A scalar type, optionally wrapped to represent SQL `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTier {
    Value(ScalarType),
    Optional(ScalarType),
}

/// A dependency implied by a tier in the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportTag {
    /// Null-aware wrapper types.
    Nullable,
    /// Calendar timestamps.
    Time,
    /// Arbitrary-precision decimals.
    Decimal,
}

impl TypeTier {
    pub fn scalar(&self) -> &ScalarType {
        match self {
            TypeTier::Value(s) | TypeTier::Optional(s) => s,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, TypeTier::Optional(_))
    }

    /// Wrap the tier as nullable. Byte sequences stay bare: absence is an empty sequence.
    pub fn into_optional(self) -> TypeTier {
        match self {
            TypeTier::Value(ScalarType::Bytes) => TypeTier::Value(ScalarType::Bytes),
            TypeTier::Value(s) => TypeTier::Optional(s),
            optional => optional,
        }
    }

    pub fn import_tag(&self) -> Option<ImportTag> {
        match self {
            TypeTier::Value(ScalarType::Decimal) | TypeTier::Optional(ScalarType::Decimal) => {
                Some(ImportTag::Decimal)
            }
            TypeTier::Optional(_) => Some(ImportTag::Nullable),
            TypeTier::Value(ScalarType::Timestamp) => Some(ImportTag::Time),
            TypeTier::Value(_) => None,
        }
    }
}

/// Knobs for type mapping, built once from the command line.
#[derive(Debug, Clone)]
pub struct TypeOptions {
    /// Schema prefix stripped from custom type names (`mysql.point` -> `Point`).
    pub schema_prefix: String,
    /// Map `decimal` to [`ScalarType::Decimal`] instead of a 64-bit float.
    pub precise_decimal: bool,
}

impl Default for TypeOptions {
    fn default() -> Self {
        Self {
            schema_prefix: "mysql".to_string(),
            precise_decimal: false,
        }
    }
}

/// Map a raw MySQL column type to its type tier. Never fails.
pub fn map_column_type(
    raw: &str,
    nullable: bool,
    namer: &Namer,
    options: &TypeOptions,
) -> TypeTier {
    let (rest, unsigned) = strip_modifiers(raw);
    let parsed = parse_precision_scale(&rest);
    let tier = TypeTier::Value(map_scalar(&parsed, unsigned, namer, options));
    if nullable {
        tier.into_optional()
    } else {
        tier
    }
}

/// Lower-case the type and drop trailing `unsigned` / `zerofill` markers.
fn strip_modifiers(raw: &str) -> (String, bool) {
    let mut rest = raw.trim().to_lowercase();
    let mut unsigned = false;
    loop {
        if let Some(stripped) = rest.strip_suffix(" zerofill") {
            rest = stripped.trim_end().to_string();
        } else if let Some(stripped) = rest.strip_suffix(" unsigned") {
            unsigned = true;
            rest = stripped.trim_end().to_string();
        } else {
            return (rest, unsigned);
        }
    }
}

fn map_scalar(
    parsed: &ParsedType,
    unsigned: bool,
    namer: &Namer,
    options: &TypeOptions,
) -> ScalarType {
    let precision = parsed.precision;

    // Single-bit encodings are booleans regardless of sign.
    if matches!(parsed.base.as_str(), "bit" | "tinyint") && precision == Some(1) {
        return ScalarType::Bool;
    }

    match parsed.base.as_str() {
        "bit" => match precision.unwrap_or(0) {
            0..=8 => ScalarType::Uint(IntWidth::W8),
            9..=16 => ScalarType::Uint(IntWidth::W16),
            17..=32 => ScalarType::Uint(IntWidth::W32),
            _ => ScalarType::Uint(IntWidth::W64),
        },
        "bool" | "boolean" => ScalarType::Bool,
        "char" | "varchar" | "tinytext" | "text" | "mediumtext" | "longtext" | "json" => {
            ScalarType::String
        }
        // Unsigned variants widen one step so the full unsigned range fits.
        "tinyint" if unsigned => ScalarType::Int(IntWidth::W16),
        "tinyint" => ScalarType::Int(IntWidth::W8),
        "smallint" if unsigned => ScalarType::Int(IntWidth::Native),
        "smallint" => ScalarType::Int(IntWidth::W16),
        "mediumint" | "int" | "integer" if unsigned => ScalarType::Int(IntWidth::W64),
        "mediumint" | "int" | "integer" => ScalarType::Int(IntWidth::Native),
        "bigint" => ScalarType::Int(IntWidth::W64),
        "float" => ScalarType::Float32,
        "decimal" if options.precise_decimal => ScalarType::Decimal,
        "decimal" | "double" => ScalarType::Float64,
        "binary" | "varbinary" | "tinyblob" | "blob" | "mediumblob" | "longblob" => {
            ScalarType::Bytes
        }
        "timestamp" | "datetime" | "date" => ScalarType::Timestamp,
        // The driver returns `time` columns as text.
        "enum" | "set" | "time" => ScalarType::String,
        other => {
            let prefix = format!("{}.", options.schema_prefix);
            let name = other.strip_prefix(prefix.as_str()).unwrap_or(other);
            ScalarType::Custom(namer.exported(name))
        }
    }
}
