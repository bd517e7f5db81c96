//! Recursive descent parser which arranges the tokens of a file into a [`SyntaxTree`]
//!
//! The parser has a single token of lookahead and stops at the first error.
use repack_error::{Diagnostic, ParseError, Result};

use crate::{
    node::{NodeId, NodeType},
    syntax_tree::SyntaxTree,
    token::Token,
};

pub fn parse(tokens: &[Token]) -> Result<SyntaxTree> {
    Parser::new(tokens).parse_all()
}

/// The scopes that are currently open, innermost last
#[derive(Debug, Default)]
struct ScopeStack {
    open: Vec<NodeId>,
    /// The scope closed by the previous statement, which `for` and map-all assignments chain onto
    last_closed: Option<NodeId>,
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    tree: SyntaxTree,
    scopes: ScopeStack,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            pos: 0,
            tree: SyntaxTree::default(),
            scopes: ScopeStack::default(),
        }
    }

    fn parse_all(mut self) -> Result<SyntaxTree> {
        while let Some(token) = self.next() {
            let last_closed = self.scopes.last_closed.take();
            self.parse_single(token, last_closed)?;
        }

        if let Some(&innermost) = self.scopes.open.last() {
            let opener = self
                .tree
                .first_token(innermost)
                .cloned()
                .unwrap_or_else(|| Token::synthetic("{"));
            return Err(Diagnostic::at(
                ParseError::UnclosedScope {
                    opener: opener.text().to_string(),
                },
                opener.location(),
            ));
        }

        Ok(self.tree)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_kind(&self) -> Option<NodeType> {
        self.tokens.get(self.pos).map(Token::kind)
    }

    /// The node that new statements are added to
    fn current_parent(&self) -> NodeId {
        self.scopes
            .open
            .last()
            .copied()
            .unwrap_or_else(|| self.tree.root())
    }

    fn unexpected_end(&self, expected: &[NodeType]) -> Diagnostic {
        let location = self
            .tokens
            .last()
            .map(Token::location)
            .unwrap_or_default();
        Diagnostic::new(
            ParseError::UnexpectedEndOfInput {
                expected: expected.iter().map(|kind| kind.expected_name()).collect(),
            },
            Some(location),
        )
    }

    fn unexpected_token(token: &Token, expected: &[NodeType]) -> Diagnostic {
        Diagnostic::at(
            ParseError::UnexpectedToken {
                got: token.text().to_string(),
                expected: expected.iter().map(|kind| kind.expected_name()).collect(),
            },
            token.location(),
        )
    }

    /// Consumes the next token, which has to be of type `kind`
    fn expect(&mut self, kind: NodeType) -> Result<Token> {
        match self.next() {
            Some(token) if token.kind() == kind => Ok(token),
            Some(token) => Err(Self::unexpected_token(&token, &[kind])),
            None => Err(self.unexpected_end(&[kind])),
        }
    }

    fn parse_single(&mut self, token: Token, last_closed: Option<NodeId>) -> Result<()> {
        use NodeType::*;
        match token.kind() {
            Let => self.parse_variable(token, LetStatement),
            Global => self.parse_variable(token, GlobalStatement),
            Match => self.open_scope(token, MatchStatement, self.current_parent()),
            Any => {
                let any = self.tree.insert(AnyStatement, self.current_parent());
                self.tree.insert_leaf(token, any);
                self.scopes.last_closed = Some(any);
                Ok(())
            }
            For => self.parse_for(token, last_closed),
            Items | Armor | ArmorL1 | ArmorL2 | Elytras => self.parse_texture_target(token),
            Identifier => self.parse_identifier(token),
            Model => self.parse_assignment(token, ModelStatement),
            Weight => self.parse_assignment(token, WeightStatement),
            Set => self.parse_map_all(token, last_closed),
            Copy => self.parse_copy(token),
            RBrace => match self.scopes.open.pop() {
                Some(closed) => {
                    self.scopes.last_closed = Some(closed);
                    Ok(())
                }
                None => Err(Self::unexpected_token(&token, &[])),
            },
            StringLiteral | LBrace | LParen | RParen | Arrow | Comma | Parent | LetStatement
            | GlobalStatement | MatchStatement | ForStatement | AnyStatement | IdentifierList
            | ItemListingPredicate | ArmorListingPredicate | ArmorL1ListingPredicate
            | ArmorL2ListingPredicate | ElytraListingPredicate | ItemSetAllPredicate
            | ArmorSetAllPredicate | ArmorL1SetAllPredicate | ArmorL2SetAllPredicate
            | ElytraSetAllPredicate | MapAllPredicate | PredicateStatement | ModelStatement
            | CopyStatement | CopyFromToStatement | WeightStatement => {
                Err(Self::unexpected_token(&token, &[]))
            }
        }
    }

    /// Opens a new scope below `parent`, whose first child is its keyword
    fn open_scope(&mut self, keyword: Token, kind: NodeType, parent: NodeId) -> Result<()> {
        self.expect(NodeType::LBrace)?;
        let scope = self.tree.insert(kind, parent);
        self.tree.insert_leaf(keyword, scope);
        self.scopes.open.push(scope);
        Ok(())
    }

    /// `let IDENT = STRING` and `global IDENT = STRING`
    fn parse_variable(&mut self, keyword: Token, kind: NodeType) -> Result<()> {
        let ident = self.expect(NodeType::Identifier)?;
        let set = self.expect(NodeType::Set)?;
        let value = self.expect(NodeType::StringLiteral)?;

        let statement = self.tree.insert(kind, self.current_parent());
        for token in [keyword, ident, set, value] {
            self.tree.insert_leaf(token, statement);
        }
        Ok(())
    }

    /// `KEY = STRING`, where the key was already consumed
    fn parse_assignment(&mut self, key: Token, kind: NodeType) -> Result<()> {
        let set = self.expect(NodeType::Set)?;
        let value = self.expect(NodeType::StringLiteral)?;

        let statement = self.tree.insert(kind, self.current_parent());
        for token in [key, set, value] {
            self.tree.insert_leaf(token, statement);
        }
        Ok(())
    }

    fn parse_for(&mut self, keyword: Token, last_closed: Option<NodeId>) -> Result<()> {
        match last_closed {
            Some(scope)
                if matches!(
                    self.tree[scope].kind,
                    NodeType::MatchStatement | NodeType::AnyStatement
                ) =>
            {
                self.open_scope(keyword, NodeType::ForStatement, scope)
            }
            _ => Err(Diagnostic::at(
                ParseError::MisplacedChainedScope {
                    keyword: keyword.text().to_string(),
                    after: "match or any scope".to_string(),
                },
                keyword.location(),
            )),
        }
    }

    /// `items = STRING` or `items { ... }`, and the same for every other texture target
    fn parse_texture_target(&mut self, keyword: Token) -> Result<()> {
        let Some((listing, set_all)) = keyword.kind().texture_target() else {
            return Err(Self::unexpected_token(&keyword, &[]));
        };

        match self.peek_kind() {
            Some(NodeType::Set) => self.parse_assignment(keyword, set_all),
            Some(NodeType::LBrace) => self.open_scope(keyword, listing, self.current_parent()),
            Some(_) => {
                let token = self.next().unwrap_or_else(|| keyword.clone());
                Err(Self::unexpected_token(
                    &token,
                    &[NodeType::Set, NodeType::LBrace],
                ))
            }
            None => Err(self.unexpected_end(&[NodeType::Set, NodeType::LBrace])),
        }
    }

    /// Either an identifier list (`a b c`) or a predicate statement (`a = STRING`)
    fn parse_identifier(&mut self, ident: Token) -> Result<()> {
        match self.peek_kind() {
            Some(NodeType::Identifier | NodeType::RBrace | NodeType::Model) => {
                let list = self
                    .tree
                    .insert(NodeType::IdentifierList, self.current_parent());
                self.tree.insert_leaf(ident, list);
                while self.peek_kind() == Some(NodeType::Identifier) {
                    if let Some(token) = self.next() {
                        self.tree.insert_leaf(token, list);
                    }
                }
                Ok(())
            }
            _ => self.parse_assignment(ident, NodeType::PredicateStatement),
        }
    }

    /// `= STRING` after a listing scope that only contains an identifier list
    fn parse_map_all(&mut self, set: Token, last_closed: Option<NodeId>) -> Result<()> {
        let listing = match last_closed {
            Some(scope) if self.tree[scope].kind.is_listing() => scope,
            _ => {
                return Err(Diagnostic::at(
                    ParseError::MisplacedChainedScope {
                        keyword: set.text().to_string(),
                        after: "listing scope".to_string(),
                    },
                    set.location(),
                ))
            }
        };

        let first_content = self.tree.scope_content(listing).next();
        if first_content.map(|id| self.tree[id].kind) != Some(NodeType::IdentifierList) {
            return Err(Diagnostic::at(
                ParseError::MapAllWithoutIdentifierList,
                set.location(),
            ));
        }

        let value = self.expect(NodeType::StringLiteral)?;
        let map_all = self.tree.insert(NodeType::MapAllPredicate, listing);
        self.tree.insert_leaf(set, map_all);
        self.tree.insert_leaf(value, map_all);
        Ok(())
    }

    /// `copy { STRING => STRING, ... }`
    fn parse_copy(&mut self, keyword: Token) -> Result<()> {
        self.expect(NodeType::LBrace)?;
        let copy = self.tree.insert(NodeType::CopyStatement, self.current_parent());
        self.tree.insert_leaf(keyword, copy);

        loop {
            match self.next() {
                Some(token) if token.kind() == NodeType::RBrace => return Ok(()),
                Some(from) if from.kind() == NodeType::StringLiteral => {
                    let arrow = self.expect(NodeType::Arrow)?;
                    let to = self.expect(NodeType::StringLiteral)?;
                    let pair = self.tree.insert(NodeType::CopyFromToStatement, copy);
                    for token in [from, arrow, to] {
                        self.tree.insert_leaf(token, pair);
                    }

                    match self.next() {
                        Some(token) if token.kind() == NodeType::Comma => {}
                        Some(token) if token.kind() == NodeType::RBrace => return Ok(()),
                        Some(token) => {
                            return Err(Self::unexpected_token(
                                &token,
                                &[NodeType::Comma, NodeType::RBrace],
                            ))
                        }
                        None => {
                            return Err(self.unexpected_end(&[NodeType::Comma, NodeType::RBrace]))
                        }
                    }
                }
                Some(token) => {
                    return Err(Self::unexpected_token(
                        &token,
                        &[NodeType::StringLiteral, NodeType::RBrace],
                    ))
                }
                None => {
                    return Err(self.unexpected_end(&[NodeType::StringLiteral, NodeType::RBrace]))
                }
            }
        }
    }
}
