use crate::schema::ColumnDescriptor;

/// Column names recognized as the row creation timestamp.
pub const CREATE_TIME_NAMES: &[&str] = &[
    "create_time",
    "create_at",
    "create_date",
    "create_on",
    "creation_time",
    "creation_at",
    "creation_date",
    "creation_on",
    "created_time",
    "created_at",
    "created_date",
    "created_on",
    "add_time",
    "add_at",
    "add_date",
    "insert_time",
    "insert_at",
    "insert_date",
    "insert_on",
    "inserted_at",
    "inserted_on",
    "ctime",
    "c_time",
];

/// Column names recognized as the last-modification timestamp.
pub const UPDATE_TIME_NAMES: &[&str] = &[
    "update_time",
    "update_at",
    "update_date",
    "update_on",
    "updated_time",
    "updated_at",
    "updated_date",
    "updated_on",
    "modify_time",
    "modify_at",
    "modify_date",
    "modify_on",
    "modified_time",
    "modified_at",
    "modified_date",
    "modified_on",
    "edit_time",
    "edit_at",
    "edit_date",
    "edit_on",
    "edited_time",
    "edited_at",
    "edited_date",
    "edited_on",
    "utime",
    "u_time",
];

/// How an audit column stores its instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeKind {
    /// `datetime` / `timestamp`.
    Calendar,
    /// `int` / `bigint` seconds since the epoch.
    Epoch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeField {
    pub column: String,
    pub kind: TimeKind,
}

/// The recognized audit columns of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeFields {
    pub create: Option<TimeField>,
    pub update: Option<TimeField>,
}

/// Find the created/updated timestamp columns.
///
/// Columns are scanned in the given order; the first column whose name matches a role
/// and whose type classifies wins. A name match with an unusable type is skipped.
pub fn detect_time_fields(columns: &[ColumnDescriptor]) -> TimeFields {
    let mut fields = TimeFields::default();
    for column in columns {
        let name = column.name.as_str();
        if fields.create.is_none() && CREATE_TIME_NAMES.contains(&name) {
            fields.create = classify(column);
        } else if fields.update.is_none() && UPDATE_TIME_NAMES.contains(&name) {
            fields.update = classify(column);
        }
    }
    fields
}

fn classify(column: &ColumnDescriptor) -> Option<TimeField> {
    let kind = match base_type(&column.raw_type).as_str() {
        "datetime" | "timestamp" => TimeKind::Calendar,
        "int" | "bigint" => TimeKind::Epoch,
        _ => return None,
    };
    Some(TimeField {
        column: column.name.clone(),
        kind,
    })
}

/// `BIGINT(20) UNSIGNED` -> `bigint`.
fn base_type(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let word = lower.split(' ').next().unwrap_or_default();
    word.split('(').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::column;

    #[test]
    fn test_calendar_created_at() {
        let columns = vec![
            column("id", "int(11)"),
            column("created_at", "datetime"),
        ];
        let fields = detect_time_fields(&columns);
        assert_eq!(
            fields.create,
            Some(TimeField {
                column: "created_at".to_string(),
                kind: TimeKind::Calendar,
            })
        );
        assert_eq!(fields.update, None);
    }

    #[test]
    fn test_unclassifiable_type_is_ignored() {
        let fields = detect_time_fields(&[column("created_at", "varchar(20)")]);
        assert_eq!(fields, TimeFields::default());
    }

    #[test]
    fn test_epoch_types() {
        let fields = detect_time_fields(&[
            column("ctime", "int(10) unsigned"),
            column("utime", "BIGINT(20)"),
        ]);
        assert_eq!(fields.create.map(|f| f.kind), Some(TimeKind::Epoch));
        assert_eq!(fields.update.map(|f| f.kind), Some(TimeKind::Epoch));
    }

    #[test]
    fn test_first_classifiable_match_wins() {
        let fields = detect_time_fields(&[
            column("create_time", "varchar(32)"),
            column("created_at", "timestamp"),
            column("ctime", "int(11)"),
            column("updated_at", "datetime(3)"),
            column("modified_at", "datetime"),
        ]);
        assert_eq!(fields.create.unwrap().column, "created_at");
        let update = fields.update.unwrap();
        assert_eq!(update.column, "updated_at");
        assert_eq!(update.kind, TimeKind::Calendar);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let fields = detect_time_fields(&[column("Created_At", "datetime")]);
        assert_eq!(fields, TimeFields::default());
    }
}
