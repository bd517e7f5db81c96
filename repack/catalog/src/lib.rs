//! The item identifiers that predicate keys are expanded to
//!
//! Predicate keys like `sword` or `diamond_*` name families of items. An [`ItemCatalog`]
//! turns such a key into the concrete item ids that end up in the generated property files.

mod pattern;
mod vanilla;

pub use pattern::{has_wildcard, match_pattern};
pub use vanilla::VanillaItems;

/// The namespace of all vanilla items
pub const MINECRAFT_NAMESPACE: &str = "minecraft";

pub trait ItemCatalog {
    /// Returns whether `id` belongs to another namespace than minecraft.
    ///
    /// Modded ids are never expanded, they are passed through as written.
    fn is_modded(&self, id: &str) -> bool {
        id.split_once(':')
            .is_some_and(|(namespace, _)| namespace != MINECRAFT_NAMESPACE)
    }

    /// Returns every known item that `pattern` refers to, in catalog order
    fn match_family(&self, pattern: &str) -> Vec<String>;
}

impl<T: ItemCatalog + ?Sized> ItemCatalog for &T {
    fn is_modded(&self, id: &str) -> bool {
        (**self).is_modded(id)
    }

    fn match_family(&self, pattern: &str) -> Vec<String> {
        (**self).match_family(pattern)
    }
}
