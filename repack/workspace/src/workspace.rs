use std::path::PathBuf;

use crate::{CopyFromTo, MatchPredicate, PackFile, Predicate, Variables};

/// Every resolved file of a pack
#[derive(Debug)]
pub struct Workspace {
    pub files: Vec<PackFile>,
    pub globals: Variables,
    pub root: PathBuf,
}

impl Workspace {
    pub fn empty(root: PathBuf) -> Self {
        Workspace {
            files: Vec::new(),
            globals: Variables::default(),
            root,
        }
    }

    pub fn match_predicates(&self) -> impl Iterator<Item = &MatchPredicate> {
        self.files.iter().flat_map(PackFile::match_predicates)
    }

    pub fn copies(&self) -> impl Iterator<Item = &CopyFromTo> {
        self.files
            .iter()
            .flat_map(|file| &file.predicates)
            .filter_map(|predicate| match predicate {
                Predicate::Copy(entries) => Some(entries),
                _ => None,
            })
            .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
