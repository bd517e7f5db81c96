use std::path::PathBuf;

use repack_common::CodeId;

use crate::{MatchPredicate, Predicate, Variables};

/// A single resolved source file
#[derive(Debug)]
pub struct PackFile {
    pub path: PathBuf,
    pub code: CodeId,
    /// The workspace root which every asset path is relative to
    pub root: PathBuf,
    pub variables: Variables,
    /// The top level predicates in source order
    pub predicates: Vec<Predicate>,
}

impl PackFile {
    pub fn match_predicates(&self) -> impl Iterator<Item = &MatchPredicate> {
        self.predicates.iter().filter_map(|predicate| match predicate {
            Predicate::Match(match_predicate) => Some(match_predicate),
            _ => None,
        })
    }
}
