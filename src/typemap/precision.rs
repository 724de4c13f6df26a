/// A raw column type split into its canonical base name and numeric parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedType {
    /// Base name with the parenthesized segment removed, e.g. `decimal`.
    pub base: String,
    /// First parenthesized number, if it parses.
    pub precision: Option<u32>,
    /// Second parenthesized number, if present and it parses.
    pub scale: Option<u32>,
}

/// Split a raw type string into base name, precision and scale.
///
/// `decimal(10,2)` -> (`decimal`, 10, 2); `varchar(255)` -> (`varchar`, 255, -);
/// `enum('a','b')` -> (`enum`, -, -). Malformed input keeps the string as the base
/// with no numeric information.
pub fn parse_precision_scale(raw: &str) -> ParsedType {
    let unparsed = || ParsedType {
        base: raw.to_string(),
        precision: None,
        scale: None,
    };

    let Some(open) = raw.find('(') else {
        return unparsed();
    };
    let Some(close) = raw[open..].find(')').map(|i| i + open) else {
        return unparsed();
    };

    let mut parts = raw[open + 1..close].split(',');
    let precision = parts.next().and_then(parse_number);
    let scale = parts.next().and_then(parse_number);

    let mut base = format!("{}{}", &raw[..open], &raw[close + 1..])
        .trim()
        .to_string();
    // The value list is irrelevant to type mapping.
    if base.starts_with("enum") {
        base = "enum".to_string();
    } else if base.starts_with("set") {
        base = "set".to_string();
    }

    ParsedType {
        base,
        precision,
        scale,
    }
}

fn parse_number(part: &str) -> Option<u32> {
    part.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(base: &str, precision: Option<u32>, scale: Option<u32>) -> ParsedType {
        ParsedType {
            base: base.to_string(),
            precision,
            scale,
        }
    }

    #[test]
    fn test_decimal() {
        assert_eq!(
            parse_precision_scale("decimal(10,2)"),
            parsed("decimal", Some(10), Some(2))
        );
        assert_eq!(
            parse_precision_scale("decimal( 12 , 4 )"),
            parsed("decimal", Some(12), Some(4))
        );
    }

    #[test]
    fn test_precision_only() {
        assert_eq!(
            parse_precision_scale("varchar(255)"),
            parsed("varchar", Some(255), None)
        );
        assert_eq!(parse_precision_scale("tinyint(1)"), parsed("tinyint", Some(1), None));
    }

    #[test]
    fn test_no_parameters() {
        assert_eq!(parse_precision_scale("int"), parsed("int", None, None));
        assert_eq!(parse_precision_scale("datetime"), parsed("datetime", None, None));
    }

    #[test]
    fn test_enum_and_set_discard_values() {
        assert_eq!(parse_precision_scale("enum('a','b')"), parsed("enum", None, None));
        assert_eq!(
            parse_precision_scale("set('x','y','z')"),
            parsed("set", None, None)
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            parse_precision_scale("decimal(10,2"),
            parsed("decimal(10,2", None, None)
        );
        assert_eq!(parse_precision_scale("float(abc)"), parsed("float", None, None));
        assert_eq!(parse_precision_scale("char()"), parsed("char", None, None));
    }

    #[test]
    fn test_trailing_text_kept() {
        assert_eq!(
            parse_precision_scale("datetime(6) on update"),
            parsed("datetime on update", Some(6), None)
        );
    }
}
