//! Checks that every statement of a [`SyntaxTree`] is placed in a scope where it is allowed
use repack_error::{Diagnostic, Diagnostics, SemanticError};

use crate::{
    node::{NodeId, NodeType},
    syntax_tree::SyntaxTree,
};

/// The scopes that a node of type `kind` may be a direct child of
pub fn allowed_parents(kind: NodeType) -> &'static [NodeType] {
    use NodeType::*;
    const LISTINGS: &[NodeType] = &[
        ItemListingPredicate,
        ArmorListingPredicate,
        ArmorL1ListingPredicate,
        ArmorL2ListingPredicate,
        ElytraListingPredicate,
    ];

    match kind {
        LetStatement | GlobalStatement | MatchStatement | AnyStatement | CopyStatement => {
            &[Parent]
        }
        ForStatement => &[MatchStatement, AnyStatement],
        ItemListingPredicate
        | ArmorListingPredicate
        | ArmorL1ListingPredicate
        | ArmorL2ListingPredicate
        | ElytraListingPredicate
        | ItemSetAllPredicate
        | ArmorSetAllPredicate
        | ArmorL1SetAllPredicate
        | ArmorL2SetAllPredicate
        | ElytraSetAllPredicate => &[ForStatement],
        PredicateStatement => &[
            MatchStatement,
            ItemListingPredicate,
            ArmorListingPredicate,
            ArmorL1ListingPredicate,
            ArmorL2ListingPredicate,
            ElytraListingPredicate,
        ],
        WeightStatement => &[MatchStatement],
        IdentifierList | MapAllPredicate | ModelStatement => LISTINGS,
        CopyFromToStatement => &[CopyStatement],
        Parent | Identifier | StringLiteral | Match | For | Let | Global | Any | Items | Armor
        | ArmorL1 | ArmorL2 | Elytras | Copy | Model | Weight | LBrace | RBrace | LParen
        | RParen | Set | Arrow | Comma => &[],
    }
}

/// Returns every violation of the scoping rules in `tree`
pub fn analyze(tree: &SyntaxTree) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();
    analyze_scope(tree, tree.root(), &mut diagnostics);
    diagnostics
}

fn analyze_scope(tree: &SyntaxTree, scope: NodeId, diagnostics: &mut Diagnostics) {
    let scope_kind = tree[scope].kind;

    for &child in &tree[scope].children {
        let node = &tree[child];
        if node.is_leaf() {
            continue;
        }

        let allowed = allowed_parents(node.kind);
        if !allowed.contains(&scope_kind) {
            if let Some(token) = tree.first_token(child) {
                diagnostics.push(Diagnostic::at(
                    SemanticError::WrongScope {
                        token: token.text().to_string(),
                        statement: node.kind.name().to_string(),
                        allowed: allowed.iter().map(|kind| kind.name().to_string()).collect(),
                    },
                    token.location(),
                ));
            }
        }

        check_completeness(tree, child, diagnostics);
        analyze_scope(tree, child, diagnostics);
    }
}

/// Checks the children that a scope requires
fn check_completeness(tree: &SyntaxTree, id: NodeId, diagnostics: &mut Diagnostics) {
    let node = &tree[id];
    let Some(keyword) = tree.first_token(id) else {
        return;
    };

    match node.kind {
        NodeType::MatchStatement | NodeType::AnyStatement => {
            if tree.child_of_kind(id, NodeType::ForStatement).is_none() {
                diagnostics.push(Diagnostic::at(
                    SemanticError::MissingChainedScope {
                        scope: node.kind.name().to_string(),
                        missing: NodeType::ForStatement.name().to_string(),
                    },
                    keyword.location(),
                ));
            }
        }
        kind if kind.is_listing() => {
            if tree.child_of_kind(id, NodeType::IdentifierList).is_none() {
                return;
            }
            let has_map_all = tree.child_of_kind(id, NodeType::MapAllPredicate).is_some();
            let has_model = tree.child_of_kind(id, NodeType::ModelStatement).is_some();
            match (has_map_all, has_model) {
                (false, false) => diagnostics.push(Diagnostic::at(
                    SemanticError::MissingMapAllOrModel,
                    keyword.location(),
                )),
                (true, true) => diagnostics.push(Diagnostic::at(
                    SemanticError::AmbiguousIdentifierList,
                    keyword.location(),
                )),
                _ => {}
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use repack_error::{DiagnosticKind, SemanticError};

    use super::analyze;
    use crate::parse_source;

    fn semantic_errors(source: &str) -> Vec<(SemanticError, usize, usize)> {
        let tree = parse_source(source, None).unwrap();
        analyze(&tree)
            .into_iter()
            .map(|diagnostic| {
                let location = diagnostic.location.unwrap();
                match diagnostic.kind {
                    DiagnosticKind::Semantic(err) => (err, location.line, location.column),
                    other => panic!("Expected semantic error, got {other}"),
                }
            })
            .collect()
    }

    #[test]
    fn valid_file() {
        let source = r#"
            let name = "Excalibur"
            match {
                nbt.display.Name = "$(name)"
                #weight = "2"
            } for {
                items = "excalibur"
                armor { diamond_helmet = "helmet" }
                elytras { elytra } = "wings"
                items { sword model = "models/sword" }
            }
            any for { armor_l1 = "layer" }
            copy { "a" => "b" }
        "#;
        assert_eq!(semantic_errors(source), vec![]);
    }

    #[test]
    fn missing_for() {
        assert_eq!(
            semantic_errors("match { a = \"b\" }"),
            vec![(
                SemanticError::MissingChainedScope {
                    scope: "MATCH_STATEMENT".to_string(),
                    missing: "FOR_STATEMENT".to_string()
                },
                1,
                1
            )]
        );
    }

    #[test]
    fn wrong_scopes_are_all_reported() {
        let errors = semantic_errors(
            "items = \"a\"\nmatch { let a = \"b\" } for { sword = \"x\" }\n",
        );
        let tokens: Vec<_> = errors
            .iter()
            .map(|(err, line, column)| match err {
                SemanticError::WrongScope { token, .. } => (token.as_str(), *line, *column),
                other => panic!("Unexpected {other}"),
            })
            .collect();
        assert_eq!(tokens, vec![("items", 1, 1), ("let", 2, 9), ("sword", 2, 29)]);
    }

    #[test]
    fn identifier_list_needs_completion() {
        assert_eq!(
            semantic_errors("any for { items { sword } }"),
            vec![(SemanticError::MissingMapAllOrModel, 1, 11)]
        );
        assert_eq!(
            semantic_errors("any for { items { sword model = \"m\" } = \"t\" }"),
            vec![(SemanticError::AmbiguousIdentifierList, 1, 11)]
        );
    }
}
