use std::collections::BTreeSet;

use crate::typemap::ImportTag;

/// Collects and renders a Go import block.
///
/// Standard library packages (no dot in the first path element) come first, then a
/// blank line, then third-party packages; each group sorted.
#[derive(Debug, Default)]
pub struct ImportCollector {
    stdlib: BTreeSet<String>,
    third_party: BTreeSet<String>,
}

impl ImportCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str) {
        let first = path.split('/').next().unwrap_or_default();
        if first.contains('.') {
            self.third_party.insert(path.to_string());
        } else {
            self.stdlib.insert(path.to_string());
        }
    }

    pub fn add_tag(&mut self, tag: ImportTag) {
        self.add(import_path(tag));
    }

    /// Render the `import (...)` block, or an empty string when nothing was added.
    pub fn render(&self) -> String {
        if self.stdlib.is_empty() && self.third_party.is_empty() {
            return String::new();
        }

        let mut lines = vec!["import (".to_string()];
        for path in &self.stdlib {
            lines.push(format!("\t\"{path}\""));
        }
        if !self.stdlib.is_empty() && !self.third_party.is_empty() {
            lines.push(String::new());
        }
        for path in &self.third_party {
            lines.push(format!("\t\"{path}\""));
        }
        lines.push(")".to_string());
        lines.join("\n")
    }
}

/// Go package providing the types behind an import tag.
pub fn import_path(tag: ImportTag) -> &'static str {
    match tag {
        ImportTag::Nullable => "database/sql",
        ImportTag::Time => "time",
        ImportTag::Decimal => "github.com/shopspring/decimal",
    }
}
