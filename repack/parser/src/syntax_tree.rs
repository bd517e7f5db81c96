use std::{fmt::Display, ops::Index};

use crate::{
    node::{Node, NodeDisplay, NodeId, NodeType},
    token::Token,
};

/// Arena of every node of a single file, rooted at a [`NodeType::Parent`] node
#[derive(Debug)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for SyntaxTree {
    fn default() -> Self {
        SyntaxTree {
            nodes: vec![Node {
                kind: NodeType::Parent,
                value: None,
                children: Vec::new(),
                parent: None,
            }],
            root: NodeId(0),
        }
    }
}

impl SyntaxTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn debug_fmt(&self) -> impl Display + '_ {
        NodeDisplay {
            tree: self,
            node_id: self.root,
            indent: 0,
        }
    }

    /// Inserts a new node without a token below `parent`
    pub fn insert(&mut self, kind: NodeType, parent: NodeId) -> NodeId {
        self.push(Node {
            kind,
            value: None,
            children: Vec::new(),
            parent: Some(parent),
        })
    }

    /// Inserts a new leaf node for `token` below `parent`
    pub fn insert_leaf(&mut self, token: Token, parent: NodeId) -> NodeId {
        self.push(Node {
            kind: token.kind(),
            value: Some(token),
            children: Vec::new(),
            parent: Some(parent),
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn get(&self, NodeId(idx): NodeId) -> &Node {
        &self.nodes[idx]
    }

    pub(crate) fn children(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        self.get(id).children.iter().map(|child| self.get(*child))
    }

    /// Returns the first child of `id` with the given kind
    pub fn child_of_kind(&self, id: NodeId, kind: NodeType) -> Option<NodeId> {
        self.get(id)
            .children
            .iter()
            .copied()
            .find(|child| self.get(*child).kind == kind)
    }

    /// Returns the tokens of the leaf children of `id`
    pub fn leaf_tokens(&self, id: NodeId) -> impl Iterator<Item = &Token> + '_ {
        self.children(id).filter_map(|node| node.value.as_ref())
    }

    /// Returns the leftmost token below `id`, which is the keyword for every scope
    pub fn first_token(&self, id: NodeId) -> Option<&Token> {
        let node = self.get(id);
        match &node.value {
            Some(token) => Some(token),
            None => node
                .children
                .iter()
                .find_map(|child| self.first_token(*child)),
        }
    }

    /// Returns the content children of a scope, skipping its keyword
    pub fn scope_content(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let node = self.get(id);
        let skip = usize::from(node.kind != NodeType::Parent);
        node.children.iter().copied().skip(skip)
    }
}

impl Index<NodeId> for SyntaxTree {
    type Output = Node;

    fn index(&self, value: NodeId) -> &Self::Output {
        self.get(value)
    }
}
