use std::collections::HashSet;

use crate::render::ShadowTables;

pub const DEFAULT_SHADOW_PREFIX: &str = "fct_";
pub const DEFAULT_SHADOW_SUFFIX: &str = "_shadow";

/// Tables split into those generated on their own and shadow -> base pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShadowPairing {
    pub standalone: Vec<String>,
    pub shadows: ShadowTables,
}

/// Pair shadow tables with their base table, preserving the listing order.
///
/// A table is a shadow when stripping `prefix` (or, if it lacks the prefix, `suffix`)
/// leaves the name of another table in the listing.
pub fn pair_shadow_tables(tables: &[String], prefix: &str, suffix: &str) -> ShadowPairing {
    let known: HashSet<&str> = tables.iter().map(String::as_str).collect();
    let mut pairing = ShadowPairing::default();

    for table in tables {
        let base = if !prefix.is_empty() && table.starts_with(prefix) {
            table.strip_prefix(prefix)
        } else if !suffix.is_empty() {
            table.strip_suffix(suffix)
        } else {
            None
        };

        match base {
            Some(base) if !base.is_empty() && known.contains(base) => {
                tracing::debug!("Pairing shadow table {table} with {base}");
                pairing.shadows.insert(table.clone(), base.to_string());
            }
            _ => pairing.standalone.push(table.clone()),
        }
    }

    pairing
}
