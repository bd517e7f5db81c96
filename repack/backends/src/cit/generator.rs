use indexmap::map::Entry;
use repack_catalog::{has_wildcard, ItemCatalog};
use repack_common::{CompileContext, FxIndexMap, FxIndexSet};
use repack_error::{CodegenError, Diagnostic, Diagnostics, Outcome, Warning};
use repack_parser::Token;
use repack_workspace::{MatchPredicate, Predicate, PredicateType, Target, Workspace};
use tracing::{debug, info, warn};
use vfs::{Directory, File};

use crate::common::is_armor_piece;

use super::{
    property_file::{CitPropertyFile, CitVariant, ItemMatch, MergeKey},
    CitPack,
};

/// Generates a resource pack from a resolved workspace
pub(super) struct CitGenerator<'a, C> {
    compile_context: &'a CompileContext,
    workspace: &'a Workspace,
    catalog: &'a C,
    /// Every property file of the pack, files with the same merge key are merged into one
    property_files: FxIndexMap<MergeKey, CitPropertyFile>,
    diagnostics: Diagnostics,
}

impl<'a, C: ItemCatalog> CitGenerator<'a, C> {
    pub fn new(
        compile_context: &'a CompileContext,
        workspace: &'a Workspace,
        catalog: &'a C,
    ) -> Self {
        CitGenerator {
            compile_context,
            workspace,
            catalog,
            property_files: FxIndexMap::default(),
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn build(mut self) -> Outcome<Directory> {
        let workspace = self.workspace;
        let mut pack = CitPack::new(&self.compile_context.config);

        for copy in workspace.copies() {
            debug!("Copying '{}' to '{}'", copy.from, copy.to);
            pack.dir
                .insert_at(&copy.to, File::copy_of(workspace.root.join(&copy.from)));
        }

        for match_predicate in workspace.match_predicates() {
            self.convert_match(match_predicate);
        }

        info!("Creating {} cit property files", self.property_files.len());
        for property_file in self.property_files.values() {
            if property_file.items.is_empty() {
                debug!(
                    "Skipping the property file for '{}' which matches no items",
                    property_file.target
                );
                continue;
            }

            let asset = File::copy_of(workspace.root.join(&property_file.target));
            let name = pack.add_property_file(property_file, asset);
            debug!("Wrote '{name}.properties' for '{}'", property_file.target);
        }

        Outcome::new(pack.dir, self.diagnostics)
    }

    fn convert_match(&mut self, match_predicate: &MatchPredicate) {
        let mut groups: FxIndexMap<(Target, PredicateType), Vec<&Predicate>> =
            FxIndexMap::default();
        for predicate in &match_predicate.predicates {
            match predicate.target() {
                Some(target) => groups
                    .entry((target, predicate.kind()))
                    .or_default()
                    .push(predicate),
                None => self.diagnostics.push(Diagnostic::at(
                    CodegenError::InvariantViolation {
                        message: format!(
                            "the block at '{}' contains a predicate without texture or model",
                            match_predicate.token
                        ),
                    },
                    match_predicate.token.location(),
                )),
            }
        }

        for ((target, kind), predicates) in groups {
            let keys: Vec<&Token> = predicates
                .iter()
                .flat_map(|predicate| predicate.keys())
                .collect();
            let match_all = keys.is_empty()
                || predicates.iter().any(|predicate| predicate.is_set_all())
                || keys.iter().any(|key| key.text() == "*");

            let items = match match_all {
                true => ItemMatch::All,
                false => ItemMatch::Items(self.expand_keys(kind, &keys)),
            };

            let (variant, target) = match target {
                Target::Texture(path) => (CitVariant::Texture, path),
                Target::Model(path) => (CitVariant::Model, path),
            };

            self.insert(CitPropertyFile {
                variant,
                kind,
                target,
                items,
                conditions: match_predicate.conditions.clone(),
                weight: match_predicate.weight,
            });
        }
    }

    /// Resolves the keys of a predicate to item ids
    fn expand_keys(&mut self, kind: PredicateType, keys: &[&Token]) -> FxIndexSet<String> {
        let mut items = FxIndexSet::default();
        for key in keys {
            let id = key.text();
            if self.catalog.is_modded(id) {
                items.insert(id.to_string());
                continue;
            }

            let matches = self.matching_items(kind, id);

            if matches.is_empty() {
                warn!("No items match the key '{id}'");
                self.diagnostics.push(Diagnostic::at(
                    Warning::NoItemMatches { key: id.to_string() },
                    key.location(),
                ));
            }
            items.extend(matches);
        }
        items
    }

    /// The catalog items that `id` refers to and that `kind` can be applied to.
    ///
    /// Armor keys may name a material like `diamond`, which is also an item id itself.
    fn matching_items(&self, kind: PredicateType, id: &str) -> Vec<String> {
        let family = |pattern: &str| -> Vec<String> {
            self.catalog
                .match_family(pattern)
                .into_iter()
                .filter(|item| accepts(kind, item))
                .collect()
        };

        let matches = family(id);
        if matches.is_empty() && is_armor(kind) && !has_wildcard(id) {
            return family(&format!("{id}_*"));
        }
        matches
    }

    /// Adds a property file or merges it into an existing file with the same output
    fn insert(&mut self, property_file: CitPropertyFile) {
        match self.property_files.entry(property_file.merge_key()) {
            Entry::Occupied(mut entry) => entry.get_mut().items.absorb(property_file.items),
            Entry::Vacant(entry) => {
                entry.insert(property_file);
            }
        }
    }
}

fn is_armor(kind: PredicateType) -> bool {
    matches!(
        kind,
        PredicateType::Armor | PredicateType::ArmorL1 | PredicateType::ArmorL2
    )
}

/// Armor textures only apply to armor pieces
fn accepts(kind: PredicateType, item: &str) -> bool {
    !is_armor(kind) || is_armor_piece(item)
}
