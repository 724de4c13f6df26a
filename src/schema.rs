/// Key classification reported for a column (`Key` in `SHOW FULL COLUMNS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyKind {
    #[default]
    None,
    Primary,
    /// Unique (`UNI`) or non-unique (`MUL`) secondary index membership.
    Secondary,
}

impl KeyKind {
    /// Parse the raw key flag as reported by MySQL.
    pub fn from_flag(flag: &str) -> Self {
        match flag.trim() {
            "" => KeyKind::None,
            "PRI" => KeyKind::Primary,
            _ => KeyKind::Secondary,
        }
    }
}

/// Metadata for a single physical column, in schema-declared order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: String,
    /// Raw type string, e.g. `varchar(255)` or `int(10) unsigned`.
    pub raw_type: String,
    pub is_nullable: bool,
    pub key: KeyKind,
    pub comment: String,
}

/// One row of `SHOW INDEX`. Composite indexes span several rows sharing `index_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRow {
    pub table: String,
    pub is_unique: bool,
    pub index_name: String,
    pub seq_in_index: u32,
    pub column_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_kind_from_flag() {
        assert_eq!(KeyKind::from_flag(""), KeyKind::None);
        assert_eq!(KeyKind::from_flag("PRI"), KeyKind::Primary);
        assert_eq!(KeyKind::from_flag("UNI"), KeyKind::Secondary);
        assert_eq!(KeyKind::from_flag("MUL"), KeyKind::Secondary);
    }
}
