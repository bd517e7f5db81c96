use std::path::Path;

use itertools::Itertools;
use repack_common::FxIndexSet;
use repack_workspace::{PredicateType, SimplePredicate};

use crate::common::{armor_material, cit_type};

/// Whether a property file replaces a texture or a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CitVariant {
    Texture,
    Model,
}

impl CitVariant {
    /// The extension of the asset that is copied next to the property file
    pub fn extension(self) -> &'static str {
        match self {
            CitVariant::Texture => "png",
            CitVariant::Model => "json",
        }
    }
}

/// The items a property file applies to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemMatch {
    /// Every item of the texture type
    All,
    Items(FxIndexSet<String>),
}

impl ItemMatch {
    /// Unions `other` into `self`, a match-all absorbs every list
    pub fn absorb(&mut self, other: ItemMatch) {
        match (&mut *self, other) {
            (ItemMatch::All, _) => {}
            (this, ItemMatch::All) => *this = ItemMatch::All,
            (ItemMatch::Items(items), ItemMatch::Items(other)) => items.extend(other),
        }
    }

    /// Returns true if this is an enumerated list without any item
    pub fn is_empty(&self) -> bool {
        matches!(self, ItemMatch::Items(items) if items.is_empty())
    }
}

/// Identifies property files which can be merged into one
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct MergeKey {
    variant: CitVariant,
    kind: PredicateType,
    target: String,
    conditions: Vec<(String, String)>,
    weight: i32,
}

/// Describes a single optifine `.properties` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitPropertyFile {
    pub variant: CitVariant,
    pub kind: PredicateType,
    /// The texture or model path, relative to the workspace root
    pub target: String,
    pub items: ItemMatch,
    /// The conditions of the match block, written as nbt rules
    pub conditions: Vec<SimplePredicate>,
    pub weight: i32,
}

impl CitPropertyFile {
    pub(super) fn merge_key(&self) -> MergeKey {
        MergeKey {
            variant: self.variant,
            kind: self.kind,
            target: self.target.clone(),
            conditions: self
                .conditions
                .iter()
                .map(|condition| (condition.key.text().to_string(), condition.value.clone()))
                .collect(),
            weight: self.weight,
        }
    }

    /// The file name of the target up to its first `.`
    pub fn base_name(&self) -> &str {
        let file_name = Path::new(&self.target)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.target);
        match file_name.split_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => file_name,
        }
    }

    /// Renders the contents of the property file.
    ///
    /// `name` is the name of the copied asset, without its extension.
    pub fn render(&self, name: &str) -> String {
        let mut lines = Vec::new();

        if let Some(cit_type) = cit_type(self.kind) {
            lines.push(format!("type={cit_type}"));
        }

        if let ItemMatch::Items(items) = &self.items {
            lines.push(format!("items={}", items.iter().join(" ")));
        }

        match self.variant {
            CitVariant::Texture => lines.extend(self.texture_overrides(name)),
            CitVariant::Model => lines.push(format!("model={name}.json")),
        }

        for condition in &self.conditions {
            lines.push(format!("nbt.{}={}", condition.key, condition.value));
        }

        if self.weight != 0 {
            lines.push(format!("weight={}", self.weight));
        }

        let mut contents = lines.join("\n");
        contents.push('\n');
        contents
    }

    fn texture_overrides(&self, name: &str) -> Vec<String> {
        let items = match &self.items {
            ItemMatch::All => return vec![format!("texture={name}")],
            ItemMatch::Items(items) => items,
        };

        let layers: &[u8] = match self.kind {
            PredicateType::Items => {
                return items
                    .iter()
                    .map(|item| format!("texture.{item}={name}"))
                    .collect()
            }
            PredicateType::Elytras => return vec![format!("texture.elytra={name}")],
            PredicateType::Armor => &[1, 2],
            PredicateType::ArmorL1 => &[1],
            PredicateType::ArmorL2 => &[2],
            PredicateType::Match => return Vec::new(),
        };

        items
            .iter()
            .map(|item| armor_material(item))
            .unique()
            .flat_map(|material| {
                layers
                    .iter()
                    .map(move |layer| format!("texture.{material}_layer_{layer}={name}"))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use repack_common::FxIndexSet;
    use repack_parser::Token;
    use repack_workspace::{PredicateType, SimplePredicate};

    use super::{CitPropertyFile, CitVariant, ItemMatch};

    fn items(ids: &[&str]) -> ItemMatch {
        ItemMatch::Items(ids.iter().map(|id| (*id).to_string()).collect())
    }

    fn property_file(kind: PredicateType, items: ItemMatch) -> CitPropertyFile {
        CitPropertyFile {
            variant: CitVariant::Texture,
            kind,
            target: "textures/fire.png".to_string(),
            items,
            conditions: vec![],
            weight: 0,
        }
    }

    #[test]
    fn match_all() {
        let file = property_file(PredicateType::Items, ItemMatch::All);
        assert_eq!(file.render("fire"), "type=item\ntexture=fire\n");
        assert_eq!(file.base_name(), "fire");
    }

    #[test]
    fn items_with_conditions() {
        let mut file = property_file(
            PredicateType::Items,
            items(&["diamond_sword", "iron_sword"]),
        );
        file.conditions.push(SimplePredicate {
            key: Token::synthetic("display.Name"),
            value: "Fire".to_string(),
            kind: PredicateType::Match,
        });
        file.weight = 3;

        assert_eq!(
            file.render("fire"),
            "type=item\nitems=diamond_sword iron_sword\ntexture.diamond_sword=fire\ntexture.iron_sword=fire\nnbt.display.Name=Fire\nweight=3\n"
        );
    }

    #[test]
    fn armor_layers() {
        let file = property_file(
            PredicateType::Armor,
            items(&["golden_helmet", "golden_boots", "iron_boots"]),
        );
        assert_eq!(
            file.render("fire1"),
            "type=armor\nitems=golden_helmet golden_boots iron_boots\ntexture.gold_layer_1=fire1\ntexture.gold_layer_2=fire1\ntexture.iron_layer_1=fire1\ntexture.iron_layer_2=fire1\n"
        );

        let file = property_file(PredicateType::ArmorL2, items(&["diamond_leggings"]));
        assert_eq!(
            file.render("fire"),
            "type=armor\nitems=diamond_leggings\ntexture.diamond_layer_2=fire\n"
        );
    }

    #[test]
    fn elytra_and_model() {
        let file = property_file(PredicateType::Elytras, items(&["elytra"]));
        assert_eq!(
            file.render("wings"),
            "type=elytra\nitems=elytra\ntexture.elytra=wings\n"
        );

        let model = CitPropertyFile {
            variant: CitVariant::Model,
            target: "models/bow.json".to_string(),
            ..property_file(PredicateType::Items, items(&["bow"]))
        };
        assert_eq!(model.base_name(), "bow");

        let dotted = CitPropertyFile {
            target: "textures/fire.old.png".to_string(),
            ..property_file(PredicateType::Items, items(&["bow"]))
        };
        assert_eq!(dotted.base_name(), "fire");
        assert_eq!(model.render("bow"), "type=item\nitems=bow\nmodel=bow.json\n");
    }

    #[test]
    fn absorb() {
        let mut list = items(&["bow"]);
        list.absorb(items(&["crossbow", "bow"]));
        assert_eq!(list, items(&["bow", "crossbow"]));

        list.absorb(ItemMatch::All);
        assert_eq!(list, ItemMatch::All);

        list.absorb(items(&["bow"]));
        assert_eq!(list, ItemMatch::All);

        assert!(ItemMatch::Items(FxIndexSet::default()).is_empty());
        assert!(!ItemMatch::All.is_empty());
    }
}
