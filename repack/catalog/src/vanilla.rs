use rustc_hash::FxHashSet;

use crate::{has_wildcard, match_pattern, ItemCatalog, MINECRAFT_NAMESPACE};

static ITEMS: &str = include_str!("../res/items.txt");

/// The bundled catalog of vanilla item ids
#[derive(Debug)]
pub struct VanillaItems {
    items: Vec<&'static str>,
    lookup: FxHashSet<&'static str>,
}

impl Default for VanillaItems {
    fn default() -> Self {
        let items: Vec<_> = ITEMS
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let lookup = items.iter().copied().collect();
        VanillaItems { items, lookup }
    }
}

fn strip_namespace(id: &str) -> &str {
    id.strip_prefix(MINECRAFT_NAMESPACE)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

impl ItemCatalog for VanillaItems {
    /// A pattern with wildcards is matched against every id.
    /// A plain pattern is either an exact id or names the family of ids
    /// that start with `<pattern>_` or end with `_<pattern>`.
    fn match_family(&self, pattern: &str) -> Vec<String> {
        let pattern = strip_namespace(pattern);
        if pattern.is_empty() {
            return Vec::new();
        }

        if has_wildcard(pattern) {
            return self
                .items
                .iter()
                .filter(|item| match_pattern(pattern, item))
                .map(|item| (*item).to_string())
                .collect();
        }

        if self.lookup.contains(pattern) {
            return vec![pattern.to_string()];
        }

        let prefix = format!("{pattern}_");
        let suffix = format!("_{pattern}");
        self.items
            .iter()
            .filter(|item| item.starts_with(&prefix) || item.ends_with(&suffix))
            .map(|item| (*item).to_string())
            .collect()
    }
}
