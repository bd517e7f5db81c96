use core::fmt;

use repack_common::FxIndexSet;
use repack_parser::{NodeType, Token};

/// What kind of asset a predicate applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredicateType {
    Items,
    Armor,
    ArmorL1,
    ArmorL2,
    Elytras,
    /// A condition of a match block
    Match,
}

impl PredicateType {
    /// Returns the type of a listing or set-all node
    pub fn of_node(kind: NodeType) -> Option<PredicateType> {
        use NodeType::*;
        let predicate_type = match kind {
            ItemListingPredicate | ItemSetAllPredicate => PredicateType::Items,
            ArmorListingPredicate | ArmorSetAllPredicate => PredicateType::Armor,
            ArmorL1ListingPredicate | ArmorL1SetAllPredicate => PredicateType::ArmorL1,
            ArmorL2ListingPredicate | ArmorL2SetAllPredicate => PredicateType::ArmorL2,
            ElytraListingPredicate | ElytraSetAllPredicate => PredicateType::Elytras,
            MatchStatement | AnyStatement => PredicateType::Match,
            _ => return None,
        };
        Some(predicate_type)
    }
}

impl fmt::Display for PredicateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PredicateType::Items => "items",
            PredicateType::Armor => "armor",
            PredicateType::ArmorL1 => "armor_l1",
            PredicateType::ArmorL2 => "armor_l2",
            PredicateType::Elytras => "elytras",
            PredicateType::Match => "match",
        })
    }
}

/// `key = "value"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePredicate {
    pub key: Token,
    pub value: String,
    pub kind: PredicateType,
}

/// One `"from" => "to"` pair of a copy statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFromTo {
    /// Source path, relative to the workspace root
    pub from: String,
    /// Destination path, relative to the output root
    pub to: String,
    pub token: Token,
}

/// A `match` or `any` block with its `for` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPredicate {
    /// The conditions an item has to fulfill
    pub conditions: Vec<SimplePredicate>,
    /// The textures and models that are applied to matching items
    pub predicates: Vec<Predicate>,
    pub weight: i32,
    /// The `match` or `any` keyword
    pub token: Token,
}

impl MatchPredicate {
    /// Every key that the for block enumerates
    pub fn keys(&self) -> impl Iterator<Item = &Token> {
        self.predicates.iter().flat_map(Predicate::keys)
    }
}

/// The file a texture or model predicate points to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Texture(String),
    Model(String),
}

impl Target {
    pub fn path(&self) -> &str {
        match self {
            Target::Texture(path) | Target::Model(path) => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `diamond_sword = "texture"` inside of a listing
    Simple(SimplePredicate),
    /// `items = "texture"`
    SetAll {
        kind: PredicateType,
        texture: String,
        token: Token,
    },
    /// `items { a b c } = "texture"`
    MapAll {
        kind: PredicateType,
        keys: FxIndexSet<Token>,
        texture: String,
        token: Token,
    },
    /// `items { a b c model = "model" }`, an empty key set applies to every item
    ItemModel {
        keys: FxIndexSet<Token>,
        model: String,
        token: Token,
    },
    Match(MatchPredicate),
    Copy(Vec<CopyFromTo>),
}

impl Predicate {
    /// The enumerated item keys of this predicate
    pub fn keys(&self) -> Vec<&Token> {
        match self {
            Predicate::Simple(simple) => vec![&simple.key],
            Predicate::MapAll { keys, .. } | Predicate::ItemModel { keys, .. } => {
                keys.iter().collect()
            }
            Predicate::SetAll { .. } | Predicate::Match(_) | Predicate::Copy(_) => vec![],
        }
    }

    /// The asset type of this predicate, models always apply to items
    pub fn kind(&self) -> PredicateType {
        match self {
            Predicate::Simple(simple) => simple.kind,
            Predicate::SetAll { kind, .. } | Predicate::MapAll { kind, .. } => *kind,
            Predicate::ItemModel { .. } => PredicateType::Items,
            Predicate::Match(_) | Predicate::Copy(_) => PredicateType::Match,
        }
    }

    /// The texture or model this predicate applies
    pub fn target(&self) -> Option<Target> {
        match self {
            Predicate::Simple(SimplePredicate { value, .. })
            | Predicate::SetAll { texture: value, .. }
            | Predicate::MapAll { texture: value, .. } => Some(Target::Texture(value.clone())),
            Predicate::ItemModel { model, .. } => Some(Target::Model(model.clone())),
            Predicate::Match(_) | Predicate::Copy(_) => None,
        }
    }

    pub fn is_set_all(&self) -> bool {
        matches!(self, Predicate::SetAll { .. })
    }
}

#[cfg(test)]
mod tests {
    use repack_common::FxIndexSet;
    use repack_parser::{NodeType, Token};

    use super::{MatchPredicate, Predicate, PredicateType, SimplePredicate, Target};

    #[test]
    fn keys_of_block() {
        let keys: FxIndexSet<_> = [Token::synthetic("bow"), Token::synthetic("crossbow")]
            .into_iter()
            .collect();
        let block = MatchPredicate {
            conditions: vec![],
            predicates: vec![
                Predicate::SetAll {
                    kind: PredicateType::Armor,
                    texture: "a.png".to_string(),
                    token: Token::synthetic("\"a\""),
                },
                Predicate::Simple(SimplePredicate {
                    key: Token::synthetic("sword"),
                    value: "b.png".to_string(),
                    kind: PredicateType::Items,
                }),
                Predicate::ItemModel {
                    keys,
                    model: "m.json".to_string(),
                    token: Token::synthetic("\"m\""),
                },
            ],
            weight: 0,
            token: Token::synthetic("any"),
        };

        let keys: Vec<_> = block.keys().map(Token::text).collect();
        assert_eq!(keys, vec!["sword", "bow", "crossbow"]);
        assert_eq!(
            block.predicates[2].target(),
            Some(Target::Model("m.json".to_string()))
        );
        assert_eq!(block.predicates[2].kind(), PredicateType::Items);
    }

    #[test]
    fn node_types() {
        assert_eq!(
            PredicateType::of_node(NodeType::ArmorL1SetAllPredicate),
            Some(PredicateType::ArmorL1)
        );
        assert_eq!(PredicateType::of_node(NodeType::CopyStatement), None);
    }
}
