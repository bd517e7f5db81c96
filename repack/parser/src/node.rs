use core::fmt;
use std::fmt::Display;

use crate::{syntax_tree::SyntaxTree, token::Token};

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct NodeId(pub(super) usize);

/// A node of the [`SyntaxTree`].
///
/// Leaf nodes carry exactly one token and have no children,
/// every other node has no token of its own.
#[derive(Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeType,
    pub value: Option<Token>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum NodeType {
    // Statements and scopes
    Parent,
    LetStatement,
    GlobalStatement,
    MatchStatement,
    ForStatement,
    AnyStatement,
    IdentifierList,
    ItemListingPredicate,
    ArmorListingPredicate,
    ArmorL1ListingPredicate,
    ArmorL2ListingPredicate,
    ElytraListingPredicate,
    ItemSetAllPredicate,
    ArmorSetAllPredicate,
    ArmorL1SetAllPredicate,
    ArmorL2SetAllPredicate,
    ElytraSetAllPredicate,
    MapAllPredicate,
    PredicateStatement,
    ModelStatement,
    CopyStatement,
    CopyFromToStatement,
    WeightStatement,

    // Terminals
    Identifier,
    StringLiteral,
    Match,
    For,
    Let,
    Global,
    Any,
    Items,
    Armor,
    ArmorL1,
    ArmorL2,
    Elytras,
    Copy,
    Model,
    Weight,
    LBrace,
    RBrace,
    LParen,
    RParen,
    Set,
    Arrow,
    Comma,
}

/// Every token with a fixed text
const TOKEN_TABLE: [(&str, NodeType); 20] = [
    ("match", NodeType::Match),
    ("for", NodeType::For),
    ("let", NodeType::Let),
    ("global", NodeType::Global),
    ("any", NodeType::Any),
    ("items", NodeType::Items),
    ("armor", NodeType::Armor),
    ("armor_l1", NodeType::ArmorL1),
    ("armor_l2", NodeType::ArmorL2),
    ("elytras", NodeType::Elytras),
    ("copy", NodeType::Copy),
    ("model", NodeType::Model),
    ("#weight", NodeType::Weight),
    ("{", NodeType::LBrace),
    ("}", NodeType::RBrace),
    ("(", NodeType::LParen),
    (")", NodeType::RParen),
    ("=", NodeType::Set),
    ("=>", NodeType::Arrow),
    (",", NodeType::Comma),
];

impl NodeType {
    /// Returns the type of a token with the given text
    pub fn of(text: &str) -> NodeType {
        if text.starts_with(crate::token::is_quote) {
            return NodeType::StringLiteral;
        }

        TOKEN_TABLE
            .iter()
            .find(|(token, _)| *token == text)
            .map_or(NodeType::Identifier, |(_, kind)| *kind)
    }

    /// Returns the fixed text of this token type, if it has one
    pub fn as_str(self) -> Option<&'static str> {
        TOKEN_TABLE
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(token, _)| *token)
    }

    pub fn is_keyword(self) -> bool {
        use NodeType::*;
        matches!(
            self,
            Match | For | Let | Global | Any | Items | Armor | ArmorL1 | ArmorL2 | Elytras | Copy | Model | Weight
        )
    }

    pub fn is_listing(self) -> bool {
        use NodeType::*;
        matches!(
            self,
            ItemListingPredicate
                | ArmorListingPredicate
                | ArmorL1ListingPredicate
                | ArmorL2ListingPredicate
                | ElytraListingPredicate
        )
    }

    pub fn is_set_all(self) -> bool {
        use NodeType::*;
        matches!(
            self,
            ItemSetAllPredicate
                | ArmorSetAllPredicate
                | ArmorL1SetAllPredicate
                | ArmorL2SetAllPredicate
                | ElytraSetAllPredicate
        )
    }

    /// Returns the listing and the set-all node type that the keyword `self` introduces
    pub fn texture_target(self) -> Option<(NodeType, NodeType)> {
        use NodeType::*;
        let types = match self {
            Items => (ItemListingPredicate, ItemSetAllPredicate),
            Armor => (ArmorListingPredicate, ArmorSetAllPredicate),
            ArmorL1 => (ArmorL1ListingPredicate, ArmorL1SetAllPredicate),
            ArmorL2 => (ArmorL2ListingPredicate, ArmorL2SetAllPredicate),
            Elytras => (ElytraListingPredicate, ElytraSetAllPredicate),
            _ => return None,
        };
        Some(types)
    }

    /// The name of this type, as shown in diagnostics
    pub fn name(self) -> &'static str {
        use NodeType::*;
        match self {
            Parent => "PARENT",
            LetStatement => "LET_STATEMENT",
            GlobalStatement => "GLOBAL_STATEMENT",
            MatchStatement => "MATCH_STATEMENT",
            ForStatement => "FOR_STATEMENT",
            AnyStatement => "ANY_STATEMENT",
            IdentifierList => "IDENTIFIER_LIST",
            ItemListingPredicate => "ITEM_LISTING_PREDICATE",
            ArmorListingPredicate => "ARMOR_LISTING_PREDICATE",
            ArmorL1ListingPredicate => "ARMOR_L1_LISTING_PREDICATE",
            ArmorL2ListingPredicate => "ARMOR_L2_LISTING_PREDICATE",
            ElytraListingPredicate => "ELYTRA_LISTING_PREDICATE",
            ItemSetAllPredicate => "ITEM_SETALL_PREDICATE",
            ArmorSetAllPredicate => "ARMOR_SETALL_PREDICATE",
            ArmorL1SetAllPredicate => "ARMOR_L1_SETALL_PREDICATE",
            ArmorL2SetAllPredicate => "ARMOR_L2_SETALL_PREDICATE",
            ElytraSetAllPredicate => "ELYTRA_SETALL_PREDICATE",
            MapAllPredicate => "MAPALL_PREDICATE",
            PredicateStatement => "PREDICATE_STATEMENT",
            ModelStatement => "MODEL_STATEMENT",
            CopyStatement => "COPY_STATEMENT",
            CopyFromToStatement => "COPY_FROM_TO_STATEMENT",
            WeightStatement => "WEIGHT_STATEMENT",
            Identifier => "IDENTIFIER",
            StringLiteral => "STRING_LITERAL",
            Match => "LITERAL_MATCH",
            For => "LITERAL_FOR",
            Let => "LITERAL_LET",
            Global => "LITERAL_GLOBAL",
            Any => "LITERAL_ANY",
            Items => "LITERAL_ITEMS",
            Armor => "LITERAL_ARMOR",
            ArmorL1 => "LITERAL_ARMOR_L1",
            ArmorL2 => "LITERAL_ARMOR_L2",
            Elytras => "LITERAL_ELYTRAS",
            Copy => "LITERAL_COPY",
            Model => "LITERAL_MODEL",
            Weight => "LITERAL_WEIGHT",
            LBrace => "LBRACE",
            RBrace => "RBRACE",
            LParen => "LPAREN",
            RParen => "RPAREN",
            Set => "SET",
            Arrow => "ARROW",
            Comma => "COMMA",
        }
    }

    /// How an expected token of this type is described to the user
    pub fn expected_name(self) -> String {
        match self.as_str() {
            Some(text) => format!("'{text}'"),
            None => match self {
                NodeType::Identifier => "an identifier".to_string(),
                NodeType::StringLiteral => "a text literal".to_string(),
                other => other.name().to_string(),
            },
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub struct NodeDisplay<'a> {
    pub(super) tree: &'a SyntaxTree,
    pub(super) node_id: NodeId,
    pub(super) indent: usize,
}

impl NodeDisplay<'_> {
    fn write_indented(
        f: &mut fmt::Formatter<'_>,
        value: impl Display,
        indent: usize,
    ) -> fmt::Result {
        writeln!(f, "{:indent$}{}", "", value, indent = indent * 2)
    }
}

impl fmt::Display for NodeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let node = &self.tree[self.node_id];
        match &node.value {
            Some(token) => Self::write_indented(
                f,
                format_args!(
                    "{}@{}:{} '{}'",
                    node.kind,
                    token.line,
                    token.column,
                    token.text().escape_default()
                ),
                self.indent,
            )?,
            None => Self::write_indented(f, node.kind, self.indent)?,
        }

        for child in &node.children {
            let display = NodeDisplay {
                tree: self.tree,
                node_id: *child,
                indent: self.indent + 1,
            };
            write!(f, "{display}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NodeType;

    #[test]
    fn token_table() {
        assert_eq!(NodeType::of("armor_l1"), NodeType::ArmorL1);
        assert_eq!(NodeType::of("#weight"), NodeType::Weight);
        assert_eq!(NodeType::of("\"items\""), NodeType::StringLiteral);
        assert_eq!(NodeType::of("weight"), NodeType::Identifier);
        assert_eq!(NodeType::of(">"), NodeType::Identifier);
        assert_eq!(NodeType::Arrow.as_str(), Some("=>"));
        assert_eq!(NodeType::MatchStatement.as_str(), None);
    }

    #[test]
    fn keywords() {
        assert!(NodeType::Weight.is_keyword());
        assert!(!NodeType::Arrow.is_keyword());
        assert_eq!(
            NodeType::ArmorL2.texture_target(),
            Some((
                NodeType::ArmorL2ListingPredicate,
                NodeType::ArmorL2SetAllPredicate
            ))
        );
        assert_eq!(NodeType::Match.texture_target(), None);
    }
}
