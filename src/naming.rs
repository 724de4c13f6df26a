use std::collections::BTreeSet;

use heck::ToUpperCamelCase;

/// Initialisms rendered fully upper-case when they form a whole word.
pub const DEFAULT_INITIALISMS: &[&str] = &[
    "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID", "IP",
    "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS", "TTL",
    "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
];

/// Go keywords; a private identifier equal to one of these gets [`RESERVED_SUFFIX`].
pub const GO_RESERVED_WORDS: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var",
];

pub const RESERVED_SUFFIX: &str = "Reserved";

/// The three spellings derived from one raw schema identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Upper camel case, e.g. `UserID`.
    pub exported: String,
    /// Lower camel case, e.g. `userID`.
    pub private: String,
    /// `private`, suffixed when it collides with a reserved word.
    pub safe: String,
}

/// Acronym-aware identifier normalizer.
///
/// Built once at startup and passed by reference wherever names are derived.
#[derive(Debug, Clone)]
pub struct Namer {
    initialisms: BTreeSet<String>,
    reserved: BTreeSet<String>,
    reserved_suffix: String,
}

impl Default for Namer {
    fn default() -> Self {
        // Every "<letter>id" pair, e.g. UID, GID, PID.
        let letter_ids = ('A'..='Z').map(|c| format!("{c}ID"));
        let initialisms = DEFAULT_INITIALISMS
            .iter()
            .map(|s| s.to_string())
            .chain(letter_ids);
        Self::new(initialisms, GO_RESERVED_WORDS, RESERVED_SUFFIX)
    }
}

impl Namer {
    pub fn new<I, R>(initialisms: I, reserved: R, reserved_suffix: &str) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        Self {
            initialisms: initialisms
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .collect(),
            reserved: reserved.into_iter().map(|s| s.as_ref().to_string()).collect(),
            reserved_suffix: reserved_suffix.to_string(),
        }
    }

    /// Add extra initialisms on top of the current set.
    pub fn with_initialisms<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in extra {
            let word = word.as_ref().trim().to_uppercase();
            if !word.is_empty() {
                self.initialisms.insert(word);
            }
        }
        self
    }

    pub fn is_initialism(&self, word: &str) -> bool {
        self.initialisms.contains(&word.to_uppercase())
    }

    /// Upper camel case identifier, e.g. `user_id` -> `UserID`.
    pub fn exported(&self, raw: &str) -> String {
        let words = split_words(raw);
        let out: String = words.iter().map(|w| self.case_word(w)).collect();
        to_identifier(out)
    }

    /// Lower camel case identifier, e.g. `user_id` -> `userID`, `id` -> `id`.
    pub fn private(&self, raw: &str) -> String {
        let words = split_words(raw);
        let mut out = String::new();
        for (i, word) in words.iter().enumerate() {
            if i == 0 {
                out.push_str(&word.to_lowercase());
            } else {
                out.push_str(&self.case_word(word));
            }
        }
        to_identifier(out)
    }

    /// Append the reserved suffix when `private` is a reserved word (case-sensitive).
    pub fn reserved_safe(&self, private: &str) -> String {
        if self.reserved.contains(private) {
            format!("{private}{}", self.reserved_suffix)
        } else {
            private.to_string()
        }
    }

    pub fn identifier(&self, raw: &str) -> Identifier {
        let private = self.private(raw);
        Identifier {
            exported: self.exported(raw),
            safe: self.reserved_safe(&private),
            private,
        }
    }

    fn case_word(&self, word: &str) -> String {
        let is_upper = word.chars().any(|c| c.is_alphabetic())
            && !word.chars().any(|c| c.is_lowercase());
        if is_upper && self.is_initialism_run(word) {
            return word.to_string();
        }
        if self.is_initialism(word) {
            return word.to_uppercase();
        }
        word.to_lowercase().to_upper_camel_case()
    }

    /// Whether an upper-case word is a concatenation of initialisms, e.g. `APIURL`.
    ///
    /// A piece may carry trailing digits (`ID2`), and a single letter counts when digits
    /// follow it (`V2`), so `APIV2` is a run.
    fn is_initialism_run(&self, word: &str) -> bool {
        if !word.is_ascii() {
            return false;
        }
        let n = word.len();
        let mut reachable = vec![false; n + 1];
        reachable[0] = true;
        for end in 1..=n {
            let ok = (0..end)
                .any(|start| reachable[start] && self.is_run_piece(&word[start..end]));
            reachable[end] = ok;
        }
        reachable[n]
    }

    fn is_run_piece(&self, piece: &str) -> bool {
        let letters = piece.trim_end_matches(|c: char| c.is_ascii_digit());
        if letters.is_empty() {
            return false;
        }
        self.initialisms.contains(letters) || (letters.len() == 1 && letters.len() < piece.len())
    }
}

/// Split a raw identifier on separators and camel-case boundaries.
///
/// `user_name` -> [user, name]; `HTTPServer` -> [HTTP, Server]; `userID` -> [user, ID].
fn split_words(raw: &str) -> Vec<String> {
    let mut words = Vec::new();
    for segment in raw.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = segment.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                if (!prev.is_uppercase() || next_lower) && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}

fn to_identifier(name: String) -> String {
    match name.chars().next() {
        None => "_".to_string(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("user_name"), vec!["user", "name"]);
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("userID"), vec!["user", "ID"]);
        assert_eq!(split_words("__a__b"), vec!["a", "b"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_exported() {
        let namer = Namer::default();
        assert_eq!(namer.exported("user_name"), "UserName");
        assert_eq!(namer.exported("user_id"), "UserID");
        assert_eq!(namer.exported("id"), "ID");
        assert_eq!(namer.exported("api_url"), "APIURL");
        assert_eq!(namer.exported("USER_NAME"), "UserName");
        assert_eq!(namer.exported("gid"), "GID");
        assert_eq!(namer.exported("address2"), "Address2");
        assert_eq!(namer.exported("address_id_2"), "AddressID2");
        assert_eq!(namer.exported("AddressID2"), "AddressID2");
        assert_eq!(namer.exported("APIV2"), "APIV2");
        assert_eq!(namer.exported("USER2"), "User2");
    }

    #[test]
    fn test_private() {
        let namer = Namer::default();
        assert_eq!(namer.private("user_name"), "userName");
        assert_eq!(namer.private("user_id"), "userID");
        assert_eq!(namer.private("id"), "id");
        assert_eq!(namer.private("http_server"), "httpServer");
    }

    #[test]
    fn test_leading_digit_and_empty() {
        let namer = Namer::default();
        assert_eq!(namer.exported("2fa_code"), "_2faCode");
        assert_eq!(namer.exported("___"), "_");
        assert_eq!(namer.private(""), "_");
    }

    #[test]
    fn test_idempotent() {
        let namer = Namer::default();
        for raw in [
            "user_id",
            "api_url",
            "http_server",
            "created_at",
            "x",
            "2fa",
            "order_uuid",
            "address_id_2",
            "api_v2",
        ] {
            let exported = namer.exported(raw);
            assert_eq!(namer.exported(&exported), exported, "exported of {raw}");
            let private = namer.private(raw);
            assert_eq!(namer.private(&private), private, "private of {raw}");
        }
    }

    #[test]
    fn test_reserved() {
        let namer = Namer::default();
        assert_eq!(namer.identifier("type").safe, "typeReserved");
        assert_eq!(namer.identifier("range").safe, "rangeReserved");
        assert_eq!(namer.identifier("name").safe, "name");
        // Comparison is case-sensitive on the private form.
        assert_eq!(namer.reserved_safe("Type"), "Type");
    }

    #[test]
    fn test_custom_configuration() {
        let namer = Namer::new(["sku"], ["name"], "_");
        assert_eq!(namer.exported("item_sku"), "ItemSKU");
        assert_eq!(namer.exported("user_id"), "UserId");
        assert_eq!(namer.identifier("name").safe, "name_");

        let extended = Namer::default().with_initialisms(["sku", " "]);
        assert!(extended.is_initialism("Sku"));
        assert!(extended.is_initialism("id"));
    }
}
